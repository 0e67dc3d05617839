pub mod token;

pub use token::{
    FallbackMetrics, FallbackRefreshTokenStore, FallbackStats, InMemoryRefreshTokenStore,
    RefreshTokenStore,
};

#[cfg(test)]
pub use token::FlakyRefreshTokenStore;
