//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, token issuer
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL store and OAuth2 user-info client
//! - `presentation/` - HTTP handlers, DTOs, router, bearer middleware
//!
//! ## Features
//! - Signup and login with login ID + password
//! - JWT access tokens, persisted refresh tokens in an http-only cookie
//! - Logout revoking every refresh token of the user
//! - Password reset and login-ID recovery through e-mailed codes
//! - Social login with Google, Kakao and Naver access tokens
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application pepper
//! - HS256 tokens; expiry is checked against an injectable clock
//! - E-mail codes expire three minutes after they are issued

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::token_issuer::{Principal, TokenIssuer};
pub use error::{AuthError, AuthResult};
pub use infra::{HttpOAuthUserInfoGateway, PgAuthRepository, SweepReport};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
