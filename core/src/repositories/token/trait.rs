//! Refresh token store trait defining the interface for refresh token persistence.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::StorageError;

/// Storage capability for single-use refresh tokens
///
/// Keys are refresh token digests, values are the subject the token was
/// issued to. Every implementation must make `consume` an atomic
/// read-and-delete: of any number of concurrent `consume` calls for the
/// same key at most one observes the subject.
///
/// # Example
/// ```no_run
/// # use std::time::Duration;
/// # use idm_core::repositories::RefreshTokenStore;
/// # async fn example(store: &impl RefreshTokenStore) -> Result<(), Box<dyn std::error::Error>> {
/// store.put("digest", "demo", Duration::from_secs(3600)).await?;
///
/// assert_eq!(store.consume("digest").await?, Some("demo".to_string()));
/// assert_eq!(store.consume("digest").await?, None);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Short backend name used in logs and errors
    fn backend_name(&self) -> &'static str;

    /// Store `subject` under `key` for `ttl`
    ///
    /// # Returns
    /// * `Ok(())` - Entry written
    /// * `Err(StorageError)` - Backend unreachable or timed out
    async fn put(&self, key: &str, subject: &str, ttl: Duration) -> Result<(), StorageError>;

    /// Atomically remove the entry under `key` and return its subject
    ///
    /// # Returns
    /// * `Ok(Some(subject))` - Entry was present and unexpired; it is now gone
    /// * `Ok(None)` - No live entry under `key`
    /// * `Err(StorageError)` - Backend unreachable or timed out
    async fn consume(&self, key: &str) -> Result<Option<String>, StorageError>;
}

#[async_trait]
impl<T: RefreshTokenStore + ?Sized> RefreshTokenStore for Arc<T> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    async fn put(&self, key: &str, subject: &str, ttl: Duration) -> Result<(), StorageError> {
        (**self).put(key, subject, ttl).await
    }

    async fn consume(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).consume(key).await
    }
}
