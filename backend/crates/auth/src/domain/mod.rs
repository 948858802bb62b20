//! Domain Layer
//!
//! Entities, value objects, repository and gateway traits, and the token
//! issuer.

pub mod entity;
pub mod gateway;
pub mod repository;
pub mod token_issuer;
pub mod value_object;

// Re-exports
pub use entity::{email_code::EmailCode, refresh_token::RefreshToken, user::User};
pub use gateway::OAuthUserInfoGateway;
pub use repository::{AuthStore, EmailCodeRepository, RefreshTokenRepository, UserRepository};
pub use token_issuer::{IssuedToken, Principal, TokenIssuer};
