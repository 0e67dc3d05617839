//! Token issuance and credential configuration

use serde::{Deserialize, Serialize};

/// Minimum RSA modulus size accepted for the signing key
pub const MIN_RSA_KEY_BITS: usize = 2048;

/// Access/refresh token issuance configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// `iss` claim of every access token
    pub issuer: String,

    /// Key id placed in the token header and the published JWK
    pub key_id: String,

    /// Scope granted to every issued token
    pub scope: String,

    /// Access token validity window in seconds
    pub access_token_ttl_seconds: u64,

    /// Refresh token time-to-live in seconds
    pub refresh_token_ttl_seconds: u64,

    /// RSA modulus size of the process signing key
    #[serde(default = "default_rsa_key_bits")]
    pub rsa_key_bits: usize,

    /// How often expired fallback entries are purged
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,

    /// When false no background sweeper is started
    #[serde(default = "default_sweeper_enabled")]
    pub sweeper_enabled: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            issuer: String::from("auth-service"),
            key_id: String::from("primary"),
            scope: String::from("scim.read scim.write"),
            access_token_ttl_seconds: 300,   // 5 minutes
            refresh_token_ttl_seconds: 3600, // 1 hour
            rsa_key_bits: default_rsa_key_bits(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
            sweeper_enabled: default_sweeper_enabled(),
        }
    }
}

fn default_rsa_key_bits() -> usize {
    MIN_RSA_KEY_BITS
}

fn default_sweep_interval_seconds() -> u64 {
    60
}

fn default_sweeper_enabled() -> bool {
    true
}

/// Credentials accepted by the stand-in password verifier
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    pub username: String,
    pub password: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            username: String::from("demo"),
            password: String::from("demo"),
        }
    }
}

impl CredentialsConfig {
    /// Check if the demo credentials are still in place (security warning)
    pub fn is_using_demo_credentials(&self) -> bool {
        self.username == "demo" && self.password == "demo"
    }
}
