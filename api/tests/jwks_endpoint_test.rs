//! Integration tests for GET /jwks and GET /health

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use jsonwebtoken::{crypto, Algorithm, DecodingKey};
use serde_json::Value;

use common::{app_state, password_form};
use idm_api::create_app;

#[actix_web::test]
async fn test_jwks_document_shape() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::get().uri("/jwks").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let keys = body["keys"].as_array().unwrap();
    assert_eq!(keys.len(), 1);

    let key = &keys[0];
    assert_eq!(key["kty"], "RSA");
    assert_eq!(key["alg"], "RS256");
    assert_eq!(key["use"], "sig");
    assert_eq!(key["kid"], "primary");
    assert_eq!(key["e"], "AQAB");
    assert!(!key["n"].as_str().unwrap().contains('='));
}

#[actix_web::test]
async fn test_issued_token_verifies_with_published_key() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::post()
        .uri("/token")
        .set_form(password_form("password"))
        .to_request();
    let issued: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get().uri("/oauth/jwks").to_request();
    let jwks: Value = test::call_and_read_body_json(&app, req).await;
    let jwk = &jwks["keys"][0];

    let key = DecodingKey::from_rsa_components(jwk["n"].as_str().unwrap(), jwk["e"].as_str().unwrap()).unwrap();
    let access_token = issued["access_token"].as_str().unwrap();
    let (signing_input, signature) = access_token.rsplit_once('.').unwrap();

    assert!(crypto::verify(signature, signing_input.as_bytes(), &key, Algorithm::RS256).unwrap());
}

#[actix_web::test]
async fn test_health_reports_refresh_store() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["refresh_store"]["primary_failures"], 0);
    assert_eq!(body["refresh_store"]["fallback_entries"], 0);
}
