//! Domain entities representing core business objects.

pub mod token;

// Re-export commonly used types
pub use token::{AccessTokenClaims, AccessTokenHeader, IssuedTokens, RefreshToken, TOKEN_TYPE_BEARER};
