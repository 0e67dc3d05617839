//! HTTP boundary of the IDM auth service
//!
//! Exposed as a library so the binary and the integration tests build the
//! same application.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState, RefreshStoreProbe};
