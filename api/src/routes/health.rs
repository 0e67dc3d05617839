use actix_web::{web, HttpResponse};
use idm_core::repositories::RefreshTokenStore;
use idm_core::services::credentials::CredentialVerifier;

use crate::app::AppState;

/// Handler for GET /health
///
/// Reports fallback store counters; a growing `primary_failures` means the
/// primary backend is unreachable and tokens are being kept in-process.
pub async fn health_check<S, V>(state: web::Data<AppState<S, V>>) -> HttpResponse
where
    S: RefreshTokenStore + 'static,
    V: CredentialVerifier + 'static,
{
    let stats = state.refresh_store.metrics.snapshot();
    let fallback_entries = state.refresh_store.fallback.len().await;

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "idm-auth",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "refresh_store": {
            "primary_failures": stats.primary_failures,
            "fallback_writes": stats.fallback_writes,
            "fallback_hits": stats.fallback_hits,
            "fallback_entries": fallback_entries,
        },
    }))
}
