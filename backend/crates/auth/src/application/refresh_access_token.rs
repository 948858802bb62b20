//! Refresh Access Token Use Case
//!
//! Exchanges a stored refresh token for a new access token. The refresh
//! token itself is not rotated.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::repository::RefreshTokenRepository;
use crate::domain::token_issuer::{IssuedToken, Principal, TokenIssuer};
use crate::error::{AuthError, AuthResult};

pub struct RefreshAccessTokenUseCase<R>
where
    R: RefreshTokenRepository,
{
    refresh_repo: Arc<R>,
    issuer: Arc<TokenIssuer>,
}

impl<R> RefreshAccessTokenUseCase<R>
where
    R: RefreshTokenRepository,
{
    pub fn new(refresh_repo: Arc<R>, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            refresh_repo,
            issuer,
        }
    }

    pub async fn execute(&self, refresh_token: Option<&str>) -> AuthResult<IssuedToken> {
        self.execute_at(refresh_token, Utc::now()).await
    }

    /// Missing, unknown and expired tokens are all `InvalidRefreshToken`
    pub async fn execute_at(
        &self,
        refresh_token: Option<&str>,
        now: DateTime<Utc>,
    ) -> AuthResult<IssuedToken> {
        let token = refresh_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::InvalidRefreshToken)?;

        let stored = self
            .refresh_repo
            .find_latest_valid_by_token(token, now)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        let access_token = self
            .issuer
            .issue_access_token_at(&Principal::user(stored.user_id), now)?;

        tracing::debug!(user_id = %stored.user_id, "Access token refreshed");

        Ok(access_token)
    }
}
