use actix_web::{web, HttpResponse};

use idm_core::repositories::RefreshTokenStore;
use idm_core::services::credentials::CredentialVerifier;

use crate::app::AppState;

/// Handler for GET /jwks
///
/// ```json
/// {"keys":[{"kty":"RSA","alg":"RS256","use":"sig","kid":"primary","n":"...","e":"AQAB"}]}
/// ```
pub async fn jwks<S, V>(state: web::Data<AppState<S, V>>) -> HttpResponse
where
    S: RefreshTokenStore + 'static,
    V: CredentialVerifier + 'static,
{
    HttpResponse::Ok().json(state.jwks.publish())
}
