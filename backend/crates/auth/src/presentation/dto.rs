//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub login_id: String,
    pub email: String,
    pub email_code: String,
    pub password: String,
    pub password_confirm: String,
    pub nickname: String,
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub user_id: i64,
}

/// Request body carrying a single e-mail address
#[derive(Debug, Clone, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

// ============================================================================
// Login / Tokens
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub login_id: String,
    pub password: String,
}

/// Social login request; the token was obtained from the provider by the client
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLoginRequest {
    pub access_token: String,
}

/// Access token body. The refresh token travels only in its cookie.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
}

// ============================================================================
// Account Recovery
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct FindLoginIdVerifyRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindLoginIdResponse {
    pub login_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub login_id: String,
    pub email: String,
}

// ============================================================================
// User Info (for authenticated users)
// ============================================================================

/// Current user info response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    pub user_id: i64,
    pub login_id: String,
    pub nickname: String,
    pub email: Option<String>,
    pub social_provider: Option<String>,
}

impl From<User> for UserInfoResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id.value(),
            login_id: user.login_id.as_str().to_string(),
            nickname: user.nickname.as_str().to_string(),
            email: user.email.as_ref().map(|e| e.as_str().to_string()),
            social_provider: user.social_provider.map(|p| p.code().to_string()),
        }
    }
}
