//! Sign In Use Case
//!
//! Password login. Unknown login ID, wrong password and social-only account
//! all fail with the same `LoginFailed`.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::application::issue_tokens::{LoginTokens, issue_tokens_and_store_refresh};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::token_issuer::TokenIssuer;
use crate::domain::value_object::{login_id::LoginId, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub login_id: String,
    pub password: String,
}

pub struct SignInUseCase<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    refresh_repo: Arc<R>,
    issuer: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<U, R> SignInUseCase<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        refresh_repo: Arc<R>,
        issuer: Arc<TokenIssuer>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            refresh_repo,
            issuer,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<LoginTokens> {
        self.execute_at(input, Utc::now()).await
    }

    pub async fn execute_at(&self, input: SignInInput, now: DateTime<Utc>) -> AuthResult<LoginTokens> {
        let login_id = LoginId::new(&input.login_id)?;
        let password = RawPassword::new(input.password)?;

        let user = self
            .user_repo
            .find_by_login_id(&login_id)
            .await?
            .ok_or(AuthError::LoginFailed)?;

        // verify_password is false for social accounts as well
        if !user.verify_password(&password, self.config.pepper()) {
            return Err(AuthError::LoginFailed);
        }

        let tokens =
            issue_tokens_and_store_refresh(&self.issuer, self.refresh_repo.as_ref(), &user, now)
                .await?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(tokens)
    }
}
