//! Error types for token issuance and refresh token storage

use thiserror::Error;

/// Token-related errors
///
/// The first three variants are caller-visible outcomes of the issue and
/// refresh flows. `InvalidRefreshToken` covers both unknown and expired
/// tokens so callers cannot probe for token existence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Unsupported grant type")]
    UnsupportedGrant,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token signing failed: {message}")]
    SigningFailure { message: String },

    #[error("Signing key generation failed: {message}")]
    KeyGeneration { message: String },

    #[error("Token encoding failed: {message}")]
    Encoding { message: String },
}

impl TokenError {
    /// Stable OAuth error code for the caller-visible variants
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::UnsupportedGrant => "unsupported_grant",
            TokenError::InvalidCredentials => "invalid_credentials",
            TokenError::InvalidRefreshToken => "invalid_refresh",
            TokenError::SigningFailure { .. }
            | TokenError::KeyGeneration { .. }
            | TokenError::Encoding { .. } => "server_error",
        }
    }
}

/// Refresh token storage errors
///
/// Raised by a single backend. The fallback store absorbs these for the
/// primary backend, so they only reach callers when every tier failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage backend '{backend}' unavailable: {message}")]
    BackendUnavailable {
        backend: &'static str,
        message: String,
    },

    #[error("Storage backend '{backend}' timed out after {millis}ms")]
    Timeout { backend: &'static str, millis: u64 },
}

impl StorageError {
    /// Name of the backend that failed
    pub fn backend(&self) -> &'static str {
        match self {
            StorageError::BackendUnavailable { backend, .. } | StorageError::Timeout { backend, .. } => {
                backend
            }
        }
    }
}
