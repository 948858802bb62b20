//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod oauth;
pub mod postgres;

pub use oauth::HttpOAuthUserInfoGateway;
pub use postgres::{PgAuthRepository, SweepReport};
