//! Unit tests for the Redis refresh token store

use std::time::Duration;

use idm_core::errors::StorageError;
use idm_core::repositories::RefreshTokenStore;

use crate::cache::refresh_token_store::{expiry_seconds, to_storage_error};
use crate::cache::{CacheConfig, RedisRefreshTokenStore};
use crate::InfrastructureError;

#[test]
fn test_expiry_seconds_rounds_up() {
    assert_eq!(expiry_seconds(Duration::from_secs(3600)), 3600);
    assert_eq!(expiry_seconds(Duration::from_millis(1500)), 2);
    assert_eq!(expiry_seconds(Duration::from_millis(1)), 1);
    assert_eq!(expiry_seconds(Duration::ZERO), 1);
}

#[test]
fn test_timeout_maps_to_storage_timeout() {
    let err = to_storage_error(InfrastructureError::Timeout {
        operation: "GETDEL",
        millis: 250,
    });
    assert_eq!(
        err,
        StorageError::Timeout {
            backend: "redis",
            millis: 250
        }
    );
}

#[test]
fn test_other_errors_map_to_unavailable() {
    let err = to_storage_error(InfrastructureError::Config("bad".to_string()));
    assert!(matches!(err, StorageError::BackendUnavailable { backend: "redis", .. }));
}

#[tokio::test]
async fn test_unreachable_backend_reports_storage_error() {
    let config = CacheConfig {
        connection_timeout_ms: 200,
        ..CacheConfig::new("redis://127.0.0.1:1")
    };
    let store = RedisRefreshTokenStore::new(config).unwrap();

    assert_eq!(store.backend_name(), "redis");
    let err = store
        .put("digest", "demo", Duration::from_secs(60))
        .await
        .unwrap_err();
    assert_eq!(err.backend(), "redis");
    assert!(store.consume("digest").await.is_err());
}
