//! Shared fixtures for the API integration tests

use std::sync::Arc;

use actix_web::web;
use once_cell::sync::Lazy;

use idm_api::{AppState, RefreshStoreProbe};
use idm_core::repositories::{FallbackMetrics, InMemoryRefreshTokenStore};
use idm_core::services::credentials::StaticCredentialVerifier;
use idm_core::services::token::{JwksPublisher, KeyManager, TokenIssuer, TokenIssuerConfig};

pub type TestStore = Arc<InMemoryRefreshTokenStore>;
pub type TestState = AppState<TestStore, StaticCredentialVerifier>;

/// RSA key generation is slow; one key per test binary
pub static KEYS: Lazy<Arc<KeyManager>> =
    Lazy::new(|| Arc::new(KeyManager::generate("primary", 2048).expect("test key generation")));

pub fn app_state() -> web::Data<TestState> {
    let store = Arc::new(InMemoryRefreshTokenStore::new());
    let issuer = TokenIssuer::new(
        KEYS.clone(),
        Arc::clone(&store),
        StaticCredentialVerifier::new("demo", "demo"),
        TokenIssuerConfig::default(),
    );

    web::Data::new(AppState::new(
        Arc::new(issuer),
        Arc::new(JwksPublisher::new(KEYS.clone())),
        RefreshStoreProbe::new(Arc::new(FallbackMetrics::default()), store),
    ))
}

pub fn password_form(grant_type: &str) -> Vec<(&'static str, String)> {
    vec![
        ("grant_type", grant_type.to_string()),
        ("username", "demo".to_string()),
        ("password", "demo".to_string()),
    ]
}
