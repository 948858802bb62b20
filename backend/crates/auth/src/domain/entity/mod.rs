//! Entities

pub mod email_code;
pub mod refresh_token;
pub mod user;
