//! Mapping of domain errors to OAuth error responses

use actix_web::error::{InternalError, UrlencodedError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use idm_core::errors::{DomainError, TokenError};

use crate::dto::OAuthErrorResponse;

/// Converts a `DomainError` into the HTTP response the client sees
///
/// Caller errors carry their stable OAuth code. Internal failures are
/// logged and reported as a bare `server_error`.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Token(token_error) => handle_token_error(token_error),
        DomainError::Storage(storage_error) => {
            log::error!("Refresh token storage failed: {}", storage_error);
            server_error()
        }
    }
}

fn handle_token_error(error: TokenError) -> HttpResponse {
    let status = match error {
        TokenError::UnsupportedGrant => StatusCode::BAD_REQUEST,
        TokenError::InvalidCredentials | TokenError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
        TokenError::SigningFailure { .. } | TokenError::KeyGeneration { .. } | TokenError::Encoding { .. } => {
            log::error!("Token construction failed: {}", error);
            return server_error();
        }
    };

    OAuthErrorResponse::new(error.error_code()).to_response(status)
}

fn server_error() -> HttpResponse {
    OAuthErrorResponse::new("server_error").to_response(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Error handler for `web::FormConfig`: unparseable bodies become `invalid_request`
pub fn form_error_handler(error: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected form body: {}", error);
    let response = OAuthErrorResponse::new("invalid_request")
        .with_description(error.to_string())
        .to_response(StatusCode::BAD_REQUEST);
    InternalError::from_response(error, response).into()
}
