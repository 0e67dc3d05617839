//! Token entities for RS256 access tokens and opaque refresh tokens.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// `token_type` reported to clients
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Random bytes behind every refresh token (256 bits)
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// JOSE header of an access token
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenHeader {
    pub alg: String,
    pub typ: String,
    pub kid: String,
}

impl AccessTokenHeader {
    /// RS256 JWT header bound to the given key id
    pub fn rs256(kid: impl Into<String>) -> Self {
        Self {
            alg: "RS256".to_string(),
            typ: "JWT".to_string(),
            kid: kid.into(),
        }
    }
}

/// Claims structure for the access token payload
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Issuer
    pub iss: String,

    /// Subject (authenticated username)
    pub sub: String,

    /// Space separated granted scopes
    pub scope: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp, always `iat + validity window`
    pub exp: i64,
}

impl AccessTokenClaims {
    pub fn new(
        issuer: impl Into<String>,
        subject: impl Into<String>,
        scope: impl Into<String>,
        now: i64,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            iss: issuer.into(),
            sub: subject.into(),
            scope: scope.into(),
            iat: now,
            exp: now.saturating_add(i64::try_from(ttl_seconds).unwrap_or(i64::MAX)),
        }
    }
}

/// A freshly minted refresh token
///
/// Only the SHA-256 digest of `token` is ever handed to storage.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken {
    /// Opaque token string returned to the client
    pub token: String,
}

impl std::fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshToken").finish_non_exhaustive()
    }
}

impl RefreshToken {
    /// Generates a new unguessable refresh token
    pub fn generate() -> Self {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self {
            token: URL_SAFE_NO_PAD.encode(bytes),
        }
    }

    /// Storage key for this token
    pub fn digest(&self) -> String {
        Self::digest_of(&self.token)
    }

    /// Hashes a presented token string the same way stored keys are hashed
    pub fn digest_of(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Result of a successful issue or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedTokens {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub refresh_token: String,
    pub scope: String,
}

impl IssuedTokens {
    pub fn bearer(
        access_token: String,
        expires_in: u64,
        refresh_token: String,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
            refresh_token,
            scope: scope.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_expiry_is_iat_plus_ttl() {
        let claims = AccessTokenClaims::new("auth-service", "demo", "scim.read", 1_700_000_000, 300);
        assert_eq!(claims.exp, 1_700_000_300);
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn test_refresh_tokens_are_unique_and_long() {
        let a = RefreshToken::generate();
        let b = RefreshToken::generate();
        assert_ne!(a.token, b.token);
        // 32 random bytes, base64url without padding
        assert_eq!(a.token.len(), 43);
    }

    #[test]
    fn test_digest_is_stable_sha256_hex() {
        let token = RefreshToken::generate();
        assert_eq!(token.digest(), RefreshToken::digest_of(&token.token));
        assert_eq!(token.digest().len(), 64);
        assert_eq!(
            RefreshToken::digest_of("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = RefreshToken::generate();
        assert!(!format!("{:?}", token).contains(&token.token));
    }

    #[test]
    fn test_header_serialization_order() {
        let json = serde_json::to_string(&AccessTokenHeader::rs256("primary")).unwrap();
        assert_eq!(json, r#"{"alg":"RS256","typ":"JWT","kid":"primary"}"#);
    }
}
