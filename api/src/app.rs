//! Application state and factory
//!
//! This module holds the shared state handed to every handler and builds
//! the Actix-web application around it.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};

use idm_core::repositories::{FallbackMetrics, InMemoryRefreshTokenStore, RefreshTokenStore};
use idm_core::services::credentials::CredentialVerifier;
use idm_core::services::token::{JwksPublisher, TokenIssuer};

use crate::dto::OAuthErrorResponse;
use crate::handlers::form_error_handler;
use crate::middleware::NoStore;
use crate::routes::{health::health_check, oauth};

/// Application state that holds shared services
pub struct AppState<S, V>
where
    S: RefreshTokenStore,
    V: CredentialVerifier,
{
    pub issuer: Arc<TokenIssuer<S, V>>,
    pub jwks: Arc<JwksPublisher>,
    pub refresh_store: RefreshStoreProbe,
}

impl<S, V> AppState<S, V>
where
    S: RefreshTokenStore,
    V: CredentialVerifier,
{
    pub fn new(issuer: Arc<TokenIssuer<S, V>>, jwks: Arc<JwksPublisher>, refresh_store: RefreshStoreProbe) -> Self {
        Self {
            issuer,
            jwks,
            refresh_store,
        }
    }
}

/// Read-only handles onto the refresh token store for the health endpoint
#[derive(Clone, Default)]
pub struct RefreshStoreProbe {
    pub metrics: Arc<FallbackMetrics>,
    pub fallback: Arc<InMemoryRefreshTokenStore>,
}

impl RefreshStoreProbe {
    pub fn new(metrics: Arc<FallbackMetrics>, fallback: Arc<InMemoryRefreshTokenStore>) -> Self {
        Self { metrics, fallback }
    }
}

/// Create and configure the application with all dependencies
///
/// The OAuth routes are served at the root and under `/oauth`.
pub fn create_app<S, V>(
    app_state: web::Data<AppState<S, V>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: RefreshTokenStore + 'static,
    V: CredentialVerifier + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::FormConfig::default().error_handler(form_error_handler))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check::<S, V>))
        .service(
            web::scope("/oauth")
                .wrap(NoStore::new())
                .configure(oauth::configure::<S, V>),
        )
        .service(
            web::scope("")
                .wrap(NoStore::new())
                .configure(oauth::configure::<S, V>),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    OAuthErrorResponse::new("not_found")
        .with_description("The requested resource was not found")
        .to_response(actix_web::http::StatusCode::NOT_FOUND)
}
