//! Value Object Module

pub mod email;
pub mod email_purpose;
pub mod login_id;
pub mod nickname;
pub mod social_provider;
pub mod user_password;
pub mod user_role;
