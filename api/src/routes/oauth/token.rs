use actix_web::{web, HttpResponse};

use idm_core::repositories::RefreshTokenStore;
use idm_core::services::credentials::CredentialVerifier;

use crate::app::AppState;
use crate::dto::{TokenRequest, TokenResponse};
use crate::handlers::error_handler::handle_domain_error;

/// Handler for POST /token
///
/// # Request Body (form-encoded)
///
/// ```text
/// grant_type=password&username=demo&password=demo
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 300,
///     "refresh_token": "...",
///     "scope": "scim.read scim.write"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `unsupported_grant`, or `invalid_request` for an unparseable body
/// - 401 Unauthorized: `invalid_credentials`
/// - 500 Internal Server Error: `server_error`
pub async fn token<S, V>(state: web::Data<AppState<S, V>>, form: web::Form<TokenRequest>) -> HttpResponse
where
    S: RefreshTokenStore + 'static,
    V: CredentialVerifier + 'static,
{
    let TokenRequest {
        grant_type,
        username,
        password,
    } = form.into_inner();

    let result = state
        .issuer
        .issue(
            grant_type.as_deref().unwrap_or_default(),
            username.as_deref(),
            password.as_deref(),
        )
        .await;

    match result {
        Ok(tokens) => HttpResponse::Ok().json(TokenResponse::from(tokens)),
        Err(error) => handle_domain_error(error),
    }
}
