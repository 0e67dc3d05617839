//! Redis-backed primary refresh token store

use std::time::Duration;

use async_trait::async_trait;
use idm_core::errors::StorageError;
use idm_core::repositories::RefreshTokenStore;

use crate::cache::{CacheConfig, RedisClient};
use crate::InfrastructureError;

const BACKEND: &str = "redis";

/// Refresh token store keeping one `<prefix>:<key>` string per token
///
/// Expiry is delegated to Redis via `SET ... EX`, redemption uses `GETDEL`.
pub struct RedisRefreshTokenStore {
    client: RedisClient,
}

impl RedisRefreshTokenStore {
    pub fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Ok(Self::with_client(RedisClient::new(config)?))
    }

    pub fn with_client(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    fn redis_key(&self, key: &str) -> String {
        self.client.config().make_key(key)
    }
}

#[async_trait]
impl RefreshTokenStore for RedisRefreshTokenStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    async fn put(&self, key: &str, subject: &str, ttl: Duration) -> Result<(), StorageError> {
        self.client
            .set_with_expiry(&self.redis_key(key), subject, expiry_seconds(ttl))
            .await
            .map_err(to_storage_error)
    }

    async fn consume(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.client
            .get_del(&self.redis_key(key))
            .await
            .map_err(to_storage_error)
    }
}

/// Whole seconds for `EX`, rounded up and never zero
pub(crate) fn expiry_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs();
    let secs = if ttl.subsec_nanos() > 0 { secs.saturating_add(1) } else { secs };
    secs.max(1)
}

pub(crate) fn to_storage_error(error: InfrastructureError) -> StorageError {
    match error {
        InfrastructureError::Timeout { millis, .. } => StorageError::Timeout {
            backend: BACKEND,
            millis,
        },
        other => StorageError::BackendUnavailable {
            backend: BACKEND,
            message: other.to_string(),
        },
    }
}
