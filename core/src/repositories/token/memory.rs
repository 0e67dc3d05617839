//! In-process refresh token store used as the fallback tier

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::errors::StorageError;

use super::r#trait::RefreshTokenStore;

/// Stored subject with its absolute expiry instant
#[derive(Debug, Clone)]
struct FallbackEntry {
    subject: String,
    expires_at: Instant,
}

impl FallbackEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Mutex-guarded map of refresh token digests
///
/// Entries expire lazily: `consume` drops an expired entry and reports a
/// miss, and `purge_expired` sweeps the rest.
#[derive(Debug, Default)]
pub struct InMemoryRefreshTokenStore {
    entries: Mutex<HashMap<String, FallbackEntry>>,
}

impl InMemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Removes every expired entry and returns how many were dropped
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, key: &str, subject: &str, ttl: Duration) -> Result<(), StorageError> {
        let now = Instant::now();
        let expires_at = now.checked_add(ttl).unwrap_or(now);
        self.entries.lock().await.insert(
            key.to_string(),
            FallbackEntry {
                subject: subject.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn consume(&self, key: &str) -> Result<Option<String>, StorageError> {
        // remove under the lock so concurrent redemptions cannot both see the entry
        let entry = self.entries.lock().await.remove(key);
        match entry {
            Some(entry) if entry.is_expired(Instant::now()) => {
                debug!("Dropped expired fallback refresh token");
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.subject)),
            None => Ok(None),
        }
    }
}
