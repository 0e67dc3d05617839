//! Access token serialization
//!
//! Builds the `base64url(header) "." base64url(payload)` signing input and
//! renders RSA key integers in the unsigned form JWKS expects. Serialization
//! is deterministic: the same inputs always produce the same bytes.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::domain::entities::token::{AccessTokenClaims, AccessTokenHeader};
use crate::errors::TokenError;

/// Serializes the RS256 header for `key_id`
pub fn encode_header(key_id: &str) -> Result<Vec<u8>, TokenError> {
    to_json(&AccessTokenHeader::rs256(key_id))
}

/// Serializes the claims of an access token issued at `now`
pub fn encode_payload(
    issuer: &str,
    subject: &str,
    scope: &str,
    now: i64,
    ttl_seconds: u64,
) -> Result<Vec<u8>, TokenError> {
    to_json(&AccessTokenClaims::new(issuer, subject, scope, now, ttl_seconds))
}

/// Joins encoded header and payload into the exact string that gets signed
pub fn signing_input(header: &[u8], payload: &[u8]) -> String {
    format!("{}.{}", encode_segment(header), encode_segment(payload))
}

/// Appends the signature segment to a signing input
pub fn assemble(signing_input: &str, signature: &str) -> String {
    format!("{}.{}", signing_input, signature)
}

/// Base64url without padding
pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::Encoding {
            message: format!("Invalid base64url segment: {}", e),
        })
}

/// Converts a big-endian two's-complement integer into its unsigned form
///
/// A positive integer whose top bit is set carries one extra leading zero
/// sign byte in two's-complement; that byte is dropped (RFC 7518 §6.3.1).
/// Input without a sign byte is returned as is.
pub fn encode_unsigned_int(bytes: &[u8]) -> &[u8] {
    match bytes {
        [0, rest @ ..] if !rest.is_empty() => rest,
        _ => bytes,
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, TokenError> {
    serde_json::to_vec(value).map_err(|e| TokenError::Encoding {
        message: e.to_string(),
    })
}
