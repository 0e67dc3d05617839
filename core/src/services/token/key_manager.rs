//! RS256 signing key management

use jsonwebtoken::{crypto, Algorithm, DecodingKey, EncodingKey};
use rand::rngs::OsRng;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use tracing::{error, info};

use crate::errors::TokenError;

/// Message signed and verified once after key generation
const PROBE_MESSAGE: &[u8] = b"key-manager-self-check";

/// Public half of the signing keypair as big-endian unsigned integers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyMaterial {
    modulus: Vec<u8>,
    exponent: Vec<u8>,
}

impl PublicKeyMaterial {
    /// Big-endian modulus `n`
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    /// Big-endian public exponent `e`
    pub fn exponent(&self) -> &[u8] {
        &self.exponent
    }

    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        let leading = self.modulus.iter().take_while(|b| **b == 0).count();
        match self.modulus.get(leading) {
            Some(first) => (self.modulus.len() - leading) * 8 - first.leading_zeros() as usize,
            None => 0,
        }
    }
}

/// Owner of the process signing keypair
///
/// The keypair is generated once at startup and never leaves the process;
/// the private half is only reachable through [`KeyManager::sign`].
pub struct KeyManager {
    key_id: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    public_key: PublicKeyMaterial,
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyManager")
            .field("key_id", &self.key_id)
            .field("bits", &self.public_key.bits())
            .finish()
    }
}

impl KeyManager {
    /// Generates a fresh RSA keypair and verifies it can sign
    ///
    /// # Arguments
    ///
    /// * `key_id` - Key id advertised in token headers and the JWKS
    /// * `bits` - RSA modulus size
    ///
    /// # Returns
    ///
    /// * `Ok(KeyManager)` - Keypair generated and self-checked
    /// * `Err(TokenError)` - Entropy or RSA primitive unavailable; the
    ///   process cannot serve token requests
    pub fn generate(key_id: impl Into<String>, bits: usize) -> Result<Self, TokenError> {
        let key_id = key_id.into();
        info!(key_id = %key_id, bits, "Generating RSA signing keypair");

        let private_key = RsaPrivateKey::new(&mut OsRng, bits).map_err(|e| {
            error!("RSA key generation failed: {}", e);
            TokenError::KeyGeneration {
                message: e.to_string(),
            }
        })?;

        let manager = Self::from_private_key(key_id, &private_key)?;
        manager.validate()?;
        Ok(manager)
    }

    /// Wraps an existing RSA private key
    pub fn from_private_key(
        key_id: impl Into<String>,
        private_key: &RsaPrivateKey,
    ) -> Result<Self, TokenError> {
        let der = private_key
            .to_pkcs1_der()
            .map_err(|e| TokenError::KeyGeneration {
                message: format!("Failed to encode private key: {}", e),
            })?;
        let encoding_key = EncodingKey::from_rsa_der(der.as_bytes());

        let public_key = private_key.to_public_key();
        let public_key = PublicKeyMaterial {
            modulus: public_key.n().to_bytes_be(),
            exponent: public_key.e().to_bytes_be(),
        };
        let decoding_key =
            DecodingKey::from_rsa_raw_components(&public_key.modulus, &public_key.exponent);

        Ok(Self {
            key_id: key_id.into(),
            encoding_key,
            decoding_key,
            public_key,
        })
    }

    /// Key id bound to this keypair
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Public key for JWKS publication
    pub fn public_key(&self) -> &PublicKeyMaterial {
        &self.public_key
    }

    /// Signs `message` with RSASSA-PKCS1-v1_5 SHA-256
    ///
    /// Returns the signature as unpadded base64url.
    pub fn sign(&self, message: &[u8]) -> Result<String, TokenError> {
        crypto::sign(message, &self.encoding_key, Algorithm::RS256).map_err(|e| {
            error!("RS256 signing failed: {}", e);
            TokenError::SigningFailure {
                message: e.to_string(),
            }
        })
    }

    /// Checks a base64url signature against `message` with the public key
    pub fn verify(&self, message: &[u8], signature: &str) -> bool {
        crypto::verify(signature, message, &self.decoding_key, Algorithm::RS256).unwrap_or(false)
    }

    /// Signs and verifies a probe message
    pub fn validate(&self) -> Result<(), TokenError> {
        let signature = self.sign(PROBE_MESSAGE)?;
        if self.verify(PROBE_MESSAGE, &signature) {
            Ok(())
        } else {
            Err(TokenError::SigningFailure {
                message: "Signing key failed self-check".to_string(),
            })
        }
    }
}
