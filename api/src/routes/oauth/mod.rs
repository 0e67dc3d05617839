//! OAuth route handlers
//!
//! - `POST /token` - password grant
//! - `POST /refresh` - refresh token rotation
//! - `GET /jwks` - public signing key

pub mod jwks;
pub mod refresh;
pub mod token;

use actix_web::web;
use idm_core::repositories::RefreshTokenStore;
use idm_core::services::credentials::CredentialVerifier;

pub use jwks::jwks;
pub use refresh::refresh;
pub use token::token;

/// Registers the OAuth routes on a scope
pub fn configure<S, V>(cfg: &mut web::ServiceConfig)
where
    S: RefreshTokenStore + 'static,
    V: CredentialVerifier + 'static,
{
    cfg.route("/token", web::post().to(token::<S, V>))
        .route("/refresh", web::post().to(refresh::<S, V>))
        .route("/jwks", web::get().to(jwks::<S, V>));
}
