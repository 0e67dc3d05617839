//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis configuration for the primary refresh token store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Prefix prepended to every refresh token key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Connection establishment timeout in milliseconds
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// Per-command timeout in milliseconds; exceeding it counts as backend failure
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,

    /// When false the primary store is never contacted
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            key_prefix: default_key_prefix(),
            connection_timeout_ms: default_connection_timeout_ms(),
            operation_timeout_ms: default_operation_timeout_ms(),
            enabled: default_enabled(),
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }
}

fn default_key_prefix() -> String {
    String::from("refresh")
}

fn default_connection_timeout_ms() -> u64 {
    1000
}

fn default_operation_timeout_ms() -> u64 {
    250
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key_uses_prefix() {
        let config = CacheConfig::default();
        assert_eq!(config.make_key("abc"), "refresh:abc");
        assert_eq!(config.with_prefix("").make_key("abc"), "abc");
    }
}
