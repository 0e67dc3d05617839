//! Integration tests for the Redis refresh token store
//!
//! These tests require a running Redis 6.2+ instance.
//! Run with: cargo test -p idm_infra --test redis_integration -- --ignored

use std::sync::Arc;
use std::time::Duration;

use idm_core::repositories::{FallbackRefreshTokenStore, InMemoryRefreshTokenStore, RefreshTokenStore};
use idm_infra::cache::{CacheConfig, RedisClient, RedisRefreshTokenStore};

fn config() -> CacheConfig {
    CacheConfig::new(std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()))
        .with_prefix("test:refresh")
}

fn unique_key(name: &str) -> String {
    format!("{}-{}", name, std::process::id())
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let client = RedisClient::new(config()).unwrap();
    assert!(client.health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_put_then_consume_once() {
    let store = RedisRefreshTokenStore::new(config()).unwrap();
    let key = unique_key("once");

    store.put(&key, "demo", Duration::from_secs(60)).await.unwrap();

    assert_eq!(store.consume(&key).await.unwrap(), Some("demo".to_string()));
    assert_eq!(store.consume(&key).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_entry_expires() {
    let store = RedisRefreshTokenStore::new(config()).unwrap();
    let key = unique_key("expiry");

    store.put(&key, "demo", Duration::from_secs(1)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_eq!(store.consume(&key).await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // Requires Redis server
async fn test_concurrent_consume_single_winner() {
    let store = Arc::new(RedisRefreshTokenStore::new(config()).unwrap());
    let key = unique_key("race");
    store.put(&key, "demo", Duration::from_secs(60)).await.unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            let key = key.clone();
            tokio::spawn(async move { store.consume(&key).await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().is_some() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_fallback_with_healthy_redis_skips_memory() {
    let memory = Arc::new(InMemoryRefreshTokenStore::new());
    let store = FallbackRefreshTokenStore::new(
        RedisRefreshTokenStore::new(config()).unwrap(),
        Arc::clone(&memory),
    );
    let key = unique_key("tiered");

    store.put(&key, "demo", Duration::from_secs(60)).await.unwrap();

    assert!(memory.is_empty().await);
    assert_eq!(store.consume(&key).await.unwrap(), Some("demo".to_string()));
    assert_eq!(store.metrics().snapshot().primary_failures, 0);
}
