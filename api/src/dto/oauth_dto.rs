use idm_core::domain::IssuedTokens;
use serde::{Deserialize, Serialize};

/// Form body of `POST /token`
///
/// Every field is optional so that a missing parameter surfaces as the
/// matching OAuth error instead of a generic parse failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TokenRequest {
    pub grant_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Form body of `POST /refresh`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Successful token endpoint response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub refresh_token: String,
    pub scope: String,
}

impl From<IssuedTokens> for TokenResponse {
    fn from(tokens: IssuedTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            refresh_token: tokens.refresh_token,
            scope: tokens.scope,
        }
    }
}
