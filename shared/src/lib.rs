//! Shared configuration types for the IDM auth service
//!
//! Every layer reads its settings from the structs defined here so that the
//! composition root can load them once and hand them down.

pub mod config;

pub use config::{
    AppConfig, CacheConfig, CredentialsConfig, Environment, ServerConfig, TokenConfig,
};
