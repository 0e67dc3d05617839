//! # Infrastructure Layer
//!
//! Concrete adapters for the ports defined in `idm_core`. Currently this is
//! the Redis-backed primary refresh token store.

/// Cache module - Redis client and refresh token store
pub mod cache;

pub use cache::{RedisClient, RedisRefreshTokenStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Command or connection attempt exceeded its deadline
    #[error("Cache operation '{operation}' timed out after {millis}ms")]
    Timeout { operation: &'static str, millis: u64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
