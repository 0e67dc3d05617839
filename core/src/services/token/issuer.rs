//! Issue and refresh flows

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::entities::token::{IssuedTokens, RefreshToken};
use crate::domain::value_objects::GrantType;
use crate::errors::{DomainResult, TokenError};
use crate::repositories::RefreshTokenStore;
use crate::services::credentials::CredentialVerifier;

use super::codec;
use super::config::TokenIssuerConfig;
use super::key_manager::KeyManager;

/// Mints access/refresh token pairs and redeems refresh tokens
///
/// Each request is independent; the only shared mutable state is the
/// injected refresh token store.
pub struct TokenIssuer<S, V> {
    keys: Arc<KeyManager>,
    store: S,
    verifier: V,
    config: TokenIssuerConfig,
}

impl<S: RefreshTokenStore, V: CredentialVerifier> TokenIssuer<S, V> {
    pub fn new(keys: Arc<KeyManager>, store: S, verifier: V, config: TokenIssuerConfig) -> Self {
        Self {
            keys,
            store,
            verifier,
            config,
        }
    }

    /// Password grant
    ///
    /// The grant type is checked before any credential verification or
    /// storage happens.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedTokens)` - New access and refresh token
    /// * `Err(DomainError)` - `UnsupportedGrant`, `InvalidCredentials`, or an
    ///   internal signing/storage failure
    pub async fn issue(
        &self,
        grant_type: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> DomainResult<IssuedTokens> {
        let GrantType::Password = grant_type.parse::<GrantType>()?;

        let (Some(username), Some(password)) = (username, password) else {
            return Err(TokenError::InvalidCredentials.into());
        };
        if !self.verifier.verify(username, password).await {
            debug!("Password grant rejected");
            return Err(TokenError::InvalidCredentials.into());
        }

        let tokens = self.mint(username).await?;
        info!(subject = username, "Issued token pair");
        Ok(tokens)
    }

    /// Redeems `refresh_token` and rotates it
    ///
    /// The presented token is consumed before anything else happens, so it
    /// can never be redeemed twice; the replacement gets a full TTL.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<IssuedTokens> {
        if refresh_token.is_empty() {
            return Err(TokenError::InvalidRefreshToken.into());
        }

        let subject = self
            .store
            .consume(&RefreshToken::digest_of(refresh_token))
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;

        let tokens = self.mint(&subject).await?;
        info!(subject = %subject, "Rotated refresh token");
        Ok(tokens)
    }

    /// Builds and signs an access token issued at `now`
    pub fn sign_access_token(&self, subject: &str, now: i64) -> Result<String, TokenError> {
        let header = codec::encode_header(self.keys.key_id())?;
        let payload = codec::encode_payload(
            &self.config.issuer,
            subject,
            &self.config.scope,
            now,
            self.config.access_token_ttl_seconds,
        )?;
        let signing_input = codec::signing_input(&header, &payload);
        let signature = self.keys.sign(signing_input.as_bytes())?;
        Ok(codec::assemble(&signing_input, &signature))
    }

    async fn mint(&self, subject: &str) -> DomainResult<IssuedTokens> {
        let access_token = self.sign_access_token(subject, Utc::now().timestamp())?;

        let refresh_token = RefreshToken::generate();
        self.store
            .put(&refresh_token.digest(), subject, self.config.refresh_token_ttl)
            .await?;

        Ok(IssuedTokens::bearer(
            access_token,
            self.config.access_token_ttl_seconds,
            refresh_token.token,
            self.config.scope.clone(),
        ))
    }
}
