//! JSON Web Key Set publication

use std::sync::Arc;

use crate::domain::value_objects::{Jwk, JwkSet};

use super::codec;
use super::key_manager::KeyManager;

/// Renders the process signing key as a JWKS
///
/// Output depends only on the immutable keypair, so it is safe to call from
/// any number of workers.
#[derive(Debug, Clone)]
pub struct JwksPublisher {
    keys: Arc<KeyManager>,
}

impl JwksPublisher {
    pub fn new(keys: Arc<KeyManager>) -> Self {
        Self { keys }
    }

    /// The single signing key, tagged with the key id used in token headers
    pub fn publish(&self) -> JwkSet {
        let public_key = self.keys.public_key();
        JwkSet {
            keys: vec![Jwk {
                kty: "RSA".to_string(),
                alg: "RS256".to_string(),
                key_use: "sig".to_string(),
                kid: self.keys.key_id().to_string(),
                n: codec::encode_segment(codec::encode_unsigned_int(public_key.modulus())),
                e: codec::encode_segment(codec::encode_unsigned_int(public_key.exponent())),
            }],
        }
    }
}
