use actix_web::{web, HttpResponse};

use idm_core::repositories::RefreshTokenStore;
use idm_core::services::credentials::CredentialVerifier;

use crate::app::AppState;
use crate::dto::{RefreshRequest, TokenResponse};
use crate::handlers::error_handler::handle_domain_error;

/// Handler for POST /refresh
///
/// Redeems a refresh token and returns a rotated token pair. The presented
/// token is unusable afterwards, whether or not the response reaches the
/// client.
///
/// ## Errors
/// - 400 Bad Request: `invalid_request` for an unparseable body
/// - 401 Unauthorized: `invalid_refresh` for unknown, expired, reused or missing tokens
/// - 500 Internal Server Error: `server_error`
pub async fn refresh<S, V>(state: web::Data<AppState<S, V>>, form: web::Form<RefreshRequest>) -> HttpResponse
where
    S: RefreshTokenStore + 'static,
    V: CredentialVerifier + 'static,
{
    let refresh_token = form.into_inner().refresh_token.unwrap_or_default();

    match state.issuer.refresh(&refresh_token).await {
        Ok(tokens) => HttpResponse::Ok().json(TokenResponse::from(tokens)),
        Err(error) => handle_domain_error(error),
    }
}
