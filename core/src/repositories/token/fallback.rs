//! Primary/secondary composition of refresh token stores

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::errors::StorageError;

use super::r#trait::RefreshTokenStore;

/// Counters describing how often the primary tier failed
#[derive(Debug, Default)]
pub struct FallbackMetrics {
    primary_failures: AtomicU64,
    fallback_writes: AtomicU64,
    fallback_hits: AtomicU64,
}

/// Point-in-time copy of [`FallbackMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FallbackStats {
    pub primary_failures: u64,
    pub fallback_writes: u64,
    pub fallback_hits: u64,
}

impl FallbackMetrics {
    pub fn snapshot(&self) -> FallbackStats {
        FallbackStats {
            primary_failures: self.primary_failures.load(Ordering::Relaxed),
            fallback_writes: self.fallback_writes.load(Ordering::Relaxed),
            fallback_hits: self.fallback_hits.load(Ordering::Relaxed),
        }
    }
}

/// Number of locks redemptions of distinct keys are spread over
const REDEMPTION_STRIPES: usize = 64;

/// A key whose primary write failed, so the primary may or may not hold it
#[derive(Debug, Clone, Copy)]
struct UnsettledWrite {
    expires_at: Instant,
    /// Already handed out from the secondary while the primary was unreachable
    redeemed: bool,
}

/// Store that writes to `primary` and falls back to `secondary` on failure
///
/// `put` goes to the primary and only lands in the secondary when the
/// primary errors. A primary write can be applied and still report an
/// error (a timeout after the server executed `SET`), so a key may live in
/// both tiers at once.
///
/// `consume` takes the key out of both tiers, primary first, while holding
/// a per-key redemption lock, so a concurrent caller for the same key finds
/// nothing. Keys written to the secondary are remembered until the primary
/// answers for them or they expire; a copy that turns up in the primary
/// after the secondary copy was redeemed during an outage is discarded.
/// Tokens written during an outage stay redeemable after the primary
/// recovers. Primary failures never reach the caller; they are logged and
/// counted.
pub struct FallbackRefreshTokenStore<P, S> {
    primary: P,
    secondary: S,
    redemption_locks: Vec<Mutex<()>>,
    unsettled: Mutex<HashMap<String, UnsettledWrite>>,
    metrics: Arc<FallbackMetrics>,
}

impl<P: RefreshTokenStore, S: RefreshTokenStore> FallbackRefreshTokenStore<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self {
            primary,
            secondary,
            redemption_locks: (0..REDEMPTION_STRIPES).map(|_| Mutex::new(())).collect(),
            unsettled: Mutex::new(HashMap::new()),
            metrics: Arc::new(FallbackMetrics::default()),
        }
    }

    /// Shared handle to the failure counters
    pub fn metrics(&self) -> Arc<FallbackMetrics> {
        Arc::clone(&self.metrics)
    }

    fn redemption_lock(&self, key: &str) -> &Mutex<()> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let stripe = (hasher.finish() % self.redemption_locks.len() as u64) as usize;
        &self.redemption_locks[stripe]
    }

    fn record_primary_failure(&self, operation: &str, error: &StorageError) {
        self.metrics.primary_failures.fetch_add(1, Ordering::Relaxed);
        warn!(
            backend = error.backend(),
            operation,
            error = %error,
            "Primary refresh token store failed, using {}",
            self.secondary.backend_name()
        );
    }

    async fn remember_unsettled(&self, key: &str, ttl: Duration) {
        let now = Instant::now();
        let mut unsettled = self.unsettled.lock().await;
        unsettled.retain(|_, write| write.expires_at > now);
        unsettled.insert(
            key.to_string(),
            UnsettledWrite {
                expires_at: now.checked_add(ttl).unwrap_or(now),
                redeemed: false,
            },
        );
    }
}

#[async_trait]
impl<P: RefreshTokenStore, S: RefreshTokenStore> RefreshTokenStore for FallbackRefreshTokenStore<P, S> {
    fn backend_name(&self) -> &'static str {
        "fallback"
    }

    async fn put(&self, key: &str, subject: &str, ttl: Duration) -> Result<(), StorageError> {
        match self.primary.put(key, subject, ttl).await {
            Ok(()) => Ok(()),
            Err(error) => {
                self.record_primary_failure("put", &error);
                self.secondary.put(key, subject, ttl).await?;
                self.remember_unsettled(key, ttl).await;
                self.metrics.fallback_writes.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
        }
    }

    async fn consume(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _redeeming = self.redemption_lock(key).lock().await;

        let from_primary = self.primary.consume(key).await;
        let from_secondary = self.secondary.consume(key).await;

        let mut unsettled = self.unsettled.lock().await;
        let from_primary = match from_primary {
            Ok(subject) => {
                // the primary answered, so it holds no other copy
                let settled = unsettled.remove(key);
                match (subject, settled) {
                    (Some(_), Some(write)) if write.redeemed && write.expires_at > Instant::now() => {
                        warn!("Discarded refresh token already redeemed from {}", self.secondary.backend_name());
                        return Ok(None);
                    }
                    (subject, _) => subject,
                }
            }
            Err(error) => {
                self.record_primary_failure("consume", &error);
                None
            }
        };

        match (from_primary, from_secondary) {
            (Some(subject), Ok(leftover)) => {
                if leftover.is_some() {
                    debug!("Dropped duplicate refresh token from {}", self.secondary.backend_name());
                }
                Ok(Some(subject))
            }
            (Some(subject), Err(error)) => {
                warn!(
                    backend = error.backend(),
                    error = %error,
                    "Could not clear refresh token from secondary store"
                );
                Ok(Some(subject))
            }
            (None, Ok(Some(subject))) => {
                if let Some(write) = unsettled.get_mut(key) {
                    write.redeemed = true;
                }
                self.metrics.fallback_hits.fetch_add(1, Ordering::Relaxed);
                Ok(Some(subject))
            }
            (None, from_secondary) => from_secondary,
        }
    }
}
