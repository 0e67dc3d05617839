//! Value objects representing immutable domain concepts.

pub mod grant;
pub mod jwk;

// Re-export commonly used types
pub use grant::GrantType;
pub use jwk::{Jwk, JwkSet};
