//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token issuance and credential configuration
//! - `cache` - Redis configuration for the primary refresh token store
//! - `environment` - environment detection
//! - `server` - HTTP server configuration

pub mod auth;
pub mod cache;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{CredentialsConfig, TokenConfig, MIN_RSA_KEY_BITS};
pub use cache::CacheConfig;
pub use environment::Environment;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub token: TokenConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,
}
