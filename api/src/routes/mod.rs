//! HTTP route handlers
//!
//! - `oauth` - token issuance, refresh and JWKS
//! - `health` - liveness and refresh store statistics

pub mod health;
pub mod oauth;
