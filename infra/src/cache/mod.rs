//! Cache module for Redis-based refresh token storage

pub mod redis_client;
pub mod refresh_token_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use refresh_token_store::RedisRefreshTokenStore;

// Re-export commonly used types
pub use idm_shared::config::CacheConfig;
