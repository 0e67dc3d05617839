//! # IDM Core
//!
//! Token and key lifecycle of the IDM auth service: the process signing
//! keypair, access token construction, refresh token issuance and rotation
//! over a two-tier store, and JWKS publication.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
