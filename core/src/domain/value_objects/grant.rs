//! OAuth2 grant types recognized by the token endpoint.

use std::str::FromStr;

use crate::errors::TokenError;

/// Grant types accepted at the token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    /// Resource owner password credentials
    Password,
}

impl FromStr for GrantType {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password" => Ok(GrantType::Password),
            _ => Err(TokenError::UnsupportedGrant),
        }
    }
}
