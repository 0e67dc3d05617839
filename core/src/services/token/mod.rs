//! Token service module
//!
//! This module handles the token and key lifecycle:
//! - RS256 keypair generation and signing
//! - Access token serialization
//! - Issue and refresh flows with refresh token rotation
//! - JWKS publication
//! - Background sweep of the fallback refresh token store

mod cleanup;
pub mod codec;
mod config;
mod issuer;
mod jwks;
mod key_manager;

#[cfg(test)]
mod tests;

pub use cleanup::{FallbackSweeper, SweeperConfig};
pub use config::TokenIssuerConfig;
pub use issuer::TokenIssuer;
pub use jwks::JwksPublisher;
pub use key_manager::{KeyManager, PublicKeyMaterial};
