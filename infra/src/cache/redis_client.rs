//! Redis cache client implementation
//!
//! Thin async wrapper around a multiplexed Redis connection. The connection
//! is opened lazily on first use and re-established after I/O failures, so
//! the service can start while Redis is still down. Every call is bounded by
//! the connection timeout plus the operation timeout, however many callers
//! are waiting on an unresponsive server.

use std::future::Future;
use std::time::Duration;

use redis::{aio::MultiplexedConnection, Client, RedisError, RedisResult};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::cache::CacheConfig;
use crate::InfrastructureError;

/// Redis client with lazy connection management
pub struct RedisClient {
    client: Client,
    /// Shared connection, `None` until first use or after a broken pipe
    connection: Mutex<Option<MultiplexedConnection>>,
    config: CacheConfig,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// Only the URL is validated here; no connection is attempted.
    ///
    /// # Example
    /// ```no_run
    /// use idm_infra::cache::{CacheConfig, RedisClient};
    ///
    /// async fn store_value() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::new("redis://localhost:6379"))?;
    ///     client.set_with_expiry("refresh:abc", "demo", 3600).await?;
    ///     Ok(())
    /// }
    /// ```
    pub fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str())
            .map_err(|e| InfrastructureError::Config(format!("Invalid Redis URL: {}", e)))?;

        Ok(Self {
            client,
            connection: Mutex::new(None),
            config,
        })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Set a value with expiration time
    ///
    /// # Arguments
    /// * `key` - Cache key
    /// * `value` - Value to store
    /// * `expiry_seconds` - Time to live in seconds, must be positive
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key with expiry {}s", expiry_seconds);

        let key = key.to_string();
        let value = value.to_string();
        self.execute("SET", move |mut conn| async move {
            redis::cmd("SET")
                .arg(key)
                .arg(value)
                .arg("EX")
                .arg(expiry_seconds)
                .query_async::<_, ()>(&mut conn)
                .await
        })
        .await
    }

    /// Atomically read and delete a key
    ///
    /// Uses `GETDEL` (Redis 6.2+), so of two concurrent callers at most one
    /// observes the value.
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Key existed and has been removed
    /// * `Ok(None)` - Key not found or expired
    pub async fn get_del(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let key = key.to_string();
        let value = self
            .execute("GETDEL", move |mut conn| async move {
                redis::cmd("GETDEL")
                    .arg(key)
                    .query_async::<_, Option<String>>(&mut conn)
                    .await
            })
            .await?;

        debug!(found = value.is_some(), "GETDEL completed");
        Ok(value)
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute("PING", |mut conn| async move {
                redis::cmd("PING").query_async::<_, String>(&mut conn).await
            })
            .await?;

        if response == "PONG" {
            Ok(true)
        } else {
            warn!("Redis health check returned unexpected response: {}", response);
            Ok(false)
        }
    }

    /// Run one command against the shared connection under the operation timeout
    async fn execute<T, F, Fut>(&self, operation: &'static str, command: F) -> Result<T, InfrastructureError>
    where
        F: FnOnce(MultiplexedConnection) -> Fut,
        Fut: Future<Output = RedisResult<T>>,
    {
        let conn = self.connection().await?;
        let millis = self.config.operation_timeout_ms;

        match timeout(Duration::from_millis(millis), command(conn)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                if is_retriable_error(&e) {
                    self.reset_connection().await;
                }
                Err(InfrastructureError::Cache(e))
            }
            Err(_) => {
                // the command may still be in flight on this connection
                self.reset_connection().await;
                Err(InfrastructureError::Timeout { operation, millis })
            }
        }
    }

    /// Shared connection, dialing a new one if none is cached
    ///
    /// The lock only guards the cached handle. Dialing happens outside it,
    /// so a hung connect never queues other callers behind it and each
    /// caller waits at most `connection_timeout_ms` here.
    async fn connection(&self) -> Result<MultiplexedConnection, InfrastructureError> {
        if let Some(conn) = self.connection.lock().await.as_ref() {
            return Ok(conn.clone());
        }

        let millis = self.config.connection_timeout_ms;
        let conn = timeout(
            Duration::from_millis(millis),
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| InfrastructureError::Timeout {
            operation: "CONNECT",
            millis,
        })??;

        let mut cached = self.connection.lock().await;
        match cached.as_ref() {
            // another caller connected first; keep a single shared connection
            Some(existing) => Ok(existing.clone()),
            None => {
                info!("Connected to Redis at {}", mask_url(&self.config.url));
                *cached = Some(conn.clone());
                Ok(conn)
            }
        }
    }

    async fn reset_connection(&self) {
        if self.connection.lock().await.take().is_some() {
            warn!("Dropping Redis connection after failure");
        }
    }
}

/// Check if a Redis error indicates a broken connection
///
/// The connection is discarded and re-established on the next command.
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    ) || error.is_connection_dropped()
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}****{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}
