pub mod error_dto;
pub mod oauth_dto;

pub use error_dto::OAuthErrorResponse;
pub use oauth_dto::{RefreshRequest, TokenRequest, TokenResponse};
