//! Configuration for the token issuer

use std::time::Duration;

use idm_shared::config::TokenConfig;

/// Settings the issuer applies to every token it mints
#[derive(Debug, Clone)]
pub struct TokenIssuerConfig {
    /// `iss` claim
    pub issuer: String,
    /// Scope granted to every token
    pub scope: String,
    /// Access token validity window in seconds
    pub access_token_ttl_seconds: u64,
    /// Refresh token time-to-live
    pub refresh_token_ttl: Duration,
}

impl Default for TokenIssuerConfig {
    fn default() -> Self {
        Self::from(&TokenConfig::default())
    }
}

impl From<&TokenConfig> for TokenIssuerConfig {
    fn from(config: &TokenConfig) -> Self {
        Self {
            issuer: config.issuer.clone(),
            scope: config.scope.clone(),
            access_token_ttl_seconds: config.access_token_ttl_seconds,
            refresh_token_ttl: Duration::from_secs(config.refresh_token_ttl_seconds),
        }
    }
}
