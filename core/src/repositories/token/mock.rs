//! Switchable refresh token store for exercising backend outages in tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::StorageError;

use super::memory::InMemoryRefreshTokenStore;
use super::r#trait::RefreshTokenStore;

/// In-memory store that can be taken "down" to simulate an unreachable backend
///
/// With lost write acks enabled, `put` stores the entry and then reports a
/// timeout, like a server that executed `SET` but whose reply never arrived.
#[derive(Debug)]
pub struct FlakyRefreshTokenStore {
    inner: InMemoryRefreshTokenStore,
    available: AtomicBool,
    lose_write_acks: AtomicBool,
    calls: AtomicUsize,
}

impl FlakyRefreshTokenStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryRefreshTokenStore::new(),
            available: AtomicBool::new(true),
            lose_write_acks: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a store that fails every call until brought up
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_available(false);
        store
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_lose_write_acks(&self, lose: bool) {
        self.lose_write_acks.store(lose, Ordering::SeqCst);
    }

    /// Number of put/consume calls received, failed ones included
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.inner.len().await
    }

    fn check(&self) -> Result<(), StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::BackendUnavailable {
                backend: "flaky",
                message: "connection refused".to_string(),
            })
        }
    }
}

impl Default for FlakyRefreshTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshTokenStore for FlakyRefreshTokenStore {
    fn backend_name(&self) -> &'static str {
        "flaky"
    }

    async fn put(&self, key: &str, subject: &str, ttl: Duration) -> Result<(), StorageError> {
        self.check()?;
        self.inner.put(key, subject, ttl).await?;
        if self.lose_write_acks.load(Ordering::SeqCst) {
            return Err(StorageError::Timeout {
                backend: "flaky",
                millis: 250,
            });
        }
        Ok(())
    }

    async fn consume(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        self.inner.consume(key).await
    }
}
