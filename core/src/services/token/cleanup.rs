//! Periodic sweep of expired entries in the fallback refresh token store
//!
//! Redemption already ignores expired fallback entries; the sweep only keeps
//! tokens written during a primary outage and never redeemed from piling up.

use std::sync::Arc;
use std::time::Duration;

use idm_shared::config::TokenConfig;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::repositories::InMemoryRefreshTokenStore;

/// Configuration for the fallback sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to sweep
    pub interval: Duration,
    /// Whether to run the background task at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            enabled: true,
        }
    }
}

impl From<&TokenConfig> for SweeperConfig {
    fn from(config: &TokenConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.sweep_interval_seconds),
            enabled: config.sweeper_enabled,
        }
    }
}

/// Service removing expired refresh tokens from the in-process store
pub struct FallbackSweeper {
    store: Arc<InMemoryRefreshTokenStore>,
    config: SweeperConfig,
}

impl FallbackSweeper {
    pub fn new(store: Arc<InMemoryRefreshTokenStore>, config: SweeperConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep, returning the number of entries removed
    pub async fn run_once(&self) -> usize {
        let purged = self.store.purge_expired().await;
        if purged > 0 {
            info!("Purged {} expired fallback refresh tokens", purged);
        } else {
            debug!("No expired fallback refresh tokens to purge");
        }
        purged
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when the sweeper is disabled.
    pub fn start_background_task(self) -> Option<JoinHandle<()>> {
        if !self.config.enabled || self.config.interval.is_zero() {
            warn!("Fallback refresh token sweeper is disabled");
            return None;
        }

        Some(tokio::spawn(async move {
            info!(
                "Fallback sweeper started - will run every {} seconds",
                self.config.interval.as_secs()
            );

            let mut timer = tokio::time::interval(self.config.interval);
            // the first tick completes immediately
            timer.tick().await;

            loop {
                timer.tick().await;
                self.run_once().await;
            }
        }))
    }
}
