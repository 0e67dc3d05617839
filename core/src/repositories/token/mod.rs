pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod fallback;
pub mod memory;

pub use fallback::{FallbackMetrics, FallbackRefreshTokenStore, FallbackStats};
pub use memory::InMemoryRefreshTokenStore;
pub use r#trait::RefreshTokenStore;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::FlakyRefreshTokenStore;
