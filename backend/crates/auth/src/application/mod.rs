//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod find_login_id;
pub mod get_current_user;
pub mod issue_tokens;
pub mod refresh_access_token;
pub mod reset_password;
pub mod send_sign_up_code;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod social_login;

// Re-exports
pub use config::AuthConfig;
pub use find_login_id::FindLoginIdUseCase;
pub use get_current_user::GetCurrentUserUseCase;
pub use issue_tokens::LoginTokens;
pub use refresh_access_token::RefreshAccessTokenUseCase;
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use send_sign_up_code::SendSignUpCodeUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use social_login::SocialLoginUseCase;
