//! Auth Error Types
//!
//! Auth-specific error variants. Each variant has a fixed HTTP status and a
//! stable code, and converts into `kernel::error::AppError` at the boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::mail::MailError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Blank or malformed input
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Login ID is already registered")]
    DuplicateLoginId,

    #[error("Nickname is already registered")]
    DuplicateNickname,

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Password and confirmation do not match")]
    PasswordMismatch,

    /// Unknown handle, wrong password and social-only account all land here
    #[error("Login failed")]
    LoginFailed,

    /// Refresh token missing, unknown or expired
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Email not found")]
    EmailNotFound,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("No account matches the given login ID and email")]
    AccountNotFound,

    #[error("Mail delivery failed: {0}")]
    Mail(#[from] MailError),

    #[error("OAuth provider error: {0}")]
    OAuthProvider(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::PasswordMismatch | AuthError::InvalidCode => {
                ErrorKind::BadRequest
            }
            AuthError::DuplicateLoginId
            | AuthError::DuplicateNickname
            | AuthError::DuplicateEmail => ErrorKind::Conflict,
            AuthError::LoginFailed
            | AuthError::InvalidRefreshToken
            | AuthError::InvalidToken
            | AuthError::ExpiredToken => ErrorKind::Unauthorized,
            AuthError::EmailNotFound | AuthError::AccountNotFound => ErrorKind::NotFound,
            AuthError::OAuthProvider(_) => ErrorKind::BadGateway,
            AuthError::Mail(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "VALIDATION_FAILED",
            AuthError::DuplicateLoginId => "DUPLICATE_LOGIN_ID",
            AuthError::DuplicateNickname => "DUPLICATE_NICKNAME",
            AuthError::DuplicateEmail => "DUPLICATE_EMAIL",
            AuthError::PasswordMismatch => "PASSWORD_MISMATCH",
            AuthError::LoginFailed => "LOGIN_FAILED",
            AuthError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::ExpiredToken => "EXPIRED_TOKEN",
            AuthError::EmailNotFound => "EMAIL_NOT_FOUND",
            AuthError::InvalidCode => "INVALID_CODE",
            AuthError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            AuthError::Mail(_) => "MAIL_DELIVERY_FAILED",
            AuthError::OAuthProvider(_) => "OAUTH_PROVIDER_ERROR",
            AuthError::Database(_) => "DATABASE_ERROR",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to AppError. Server-side details stay out of the message.
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            AuthError::Mail(_) => "Mail delivery failed".to_string(),
            AuthError::Database(_) | AuthError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        AppError::new(self.kind(), message).with_code(self.code())
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Mail(e) => {
                tracing::error!(error = %e, "Auth mail delivery error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::OAuthProvider(msg) => {
                tracing::warn!(message = %msg, "OAuth provider call failed");
            }
            AuthError::LoginFailed => {
                tracing::warn!("Failed login attempt");
            }
            AuthError::InvalidRefreshToken => {
                tracing::warn!("Refresh with unknown or expired token");
            }
            _ => {
                tracing::debug!(error = %self, code = self.code(), "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code_table() {
        let cases: Vec<(AuthError, u16, &str)> = vec![
            (AuthError::Validation("x".into()), 400, "VALIDATION_FAILED"),
            (AuthError::DuplicateLoginId, 409, "DUPLICATE_LOGIN_ID"),
            (AuthError::DuplicateNickname, 409, "DUPLICATE_NICKNAME"),
            (AuthError::DuplicateEmail, 409, "DUPLICATE_EMAIL"),
            (AuthError::PasswordMismatch, 400, "PASSWORD_MISMATCH"),
            (AuthError::LoginFailed, 401, "LOGIN_FAILED"),
            (AuthError::InvalidRefreshToken, 401, "INVALID_REFRESH_TOKEN"),
            (AuthError::InvalidToken, 401, "INVALID_TOKEN"),
            (AuthError::ExpiredToken, 401, "EXPIRED_TOKEN"),
            (AuthError::EmailNotFound, 404, "EMAIL_NOT_FOUND"),
            (AuthError::InvalidCode, 400, "INVALID_CODE"),
            (AuthError::AccountNotFound, 404, "ACCOUNT_NOT_FOUND"),
            (
                AuthError::Mail(MailError::Rejected { status: 503 }),
                500,
                "MAIL_DELIVERY_FAILED",
            ),
            (AuthError::OAuthProvider("down".into()), 502, "OAUTH_PROVIDER_ERROR"),
            (AuthError::Database(sqlx::Error::RowNotFound), 500, "DATABASE_ERROR"),
            (AuthError::Internal("boom".into()), 500, "INTERNAL_ERROR"),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status_code().as_u16(), status, "{err}");
            assert_eq!(err.code(), code);
            let app = err.to_app_error();
            assert_eq!(app.status_code(), status);
            assert_eq!(app.code(), code);
        }
    }

    #[test]
    fn test_internal_details_are_not_rendered() {
        let app = AuthError::Internal("pool exhausted at 10.0.0.3".into()).to_app_error();
        assert_eq!(app.message(), "Internal server error");
    }

    #[test]
    fn test_into_response_status() {
        let response = AuthError::ExpiredToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
