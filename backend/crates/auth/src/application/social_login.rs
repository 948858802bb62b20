//! Social Login Use Case
//!
//! Resolves a provider access token to a local account, creating one on
//! first login, then issues the same token pair as password login.
//! Retrying is safe: the same provider id always resolves to the same row.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::issue_tokens::{LoginTokens, issue_tokens_and_store_refresh};
use crate::domain::entity::user::{NewUser, User};
use crate::domain::gateway::OAuthUserInfoGateway;
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::token_issuer::TokenIssuer;
use crate::domain::value_object::{
    email::Email, login_id::LoginId, nickname::Nickname, social_provider::SocialProvider,
};
use crate::error::{AuthError, AuthResult};

/// Attempts at drawing an unused random nickname
pub const NICKNAME_ATTEMPTS: usize = 5;

pub struct SocialLoginUseCase<U, R, G>
where
    U: UserRepository,
    R: RefreshTokenRepository,
    G: OAuthUserInfoGateway,
{
    user_repo: Arc<U>,
    refresh_repo: Arc<R>,
    gateway: Arc<G>,
    issuer: Arc<TokenIssuer>,
}

impl<U, R, G> SocialLoginUseCase<U, R, G>
where
    U: UserRepository,
    R: RefreshTokenRepository,
    G: OAuthUserInfoGateway,
{
    pub fn new(
        user_repo: Arc<U>,
        refresh_repo: Arc<R>,
        gateway: Arc<G>,
        issuer: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            user_repo,
            refresh_repo,
            gateway,
            issuer,
        }
    }

    pub async fn execute(
        &self,
        provider: SocialProvider,
        access_token: &str,
    ) -> AuthResult<LoginTokens> {
        self.execute_at(provider, access_token, Utc::now()).await
    }

    pub async fn execute_at(
        &self,
        provider: SocialProvider,
        access_token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<LoginTokens> {
        let access_token = access_token.trim();
        if access_token.is_empty() {
            return Err(AuthError::Validation("Provider access token is required".into()));
        }

        let attributes = self.gateway.fetch_user_info(provider, access_token).await?;

        let provider_id = provider
            .extract_id(&attributes)
            .ok_or(AuthError::LoginFailed)?;
        let login_id =
            LoginId::new(provider.login_handle(&provider_id)).map_err(|_| AuthError::LoginFailed)?;

        let user = match self.user_repo.find_by_login_id(&login_id).await? {
            Some(existing) => existing,
            None => {
                let email = provider
                    .extract_email(&attributes)
                    .and_then(|raw| Email::new(raw).ok());
                self.provision(provider, login_id, email).await?
            }
        };

        // A local account that happens to own a "{provider}_{id}" handle
        if user.social_provider != Some(provider) {
            return Err(AuthError::LoginFailed);
        }

        let tokens =
            issue_tokens_and_store_refresh(&self.issuer, self.refresh_repo.as_ref(), &user, now)
                .await?;

        tracing::info!(user_id = %user.id, provider = %provider, "User signed in with provider");

        Ok(tokens)
    }

    async fn provision(
        &self,
        provider: SocialProvider,
        login_id: LoginId,
        email: Option<Email>,
    ) -> AuthResult<User> {
        let nickname = self.unused_nickname().await?;

        match self
            .user_repo
            .create(NewUser::social(provider, login_id.clone(), email, nickname))
            .await
        {
            Ok(user) => {
                tracing::info!(
                    user_id = %user.id,
                    provider = %provider,
                    "Provisioned social account"
                );
                Ok(user)
            }
            // A concurrent first login for the same provider id won the insert
            Err(AuthError::DuplicateLoginId) => self
                .user_repo
                .find_by_login_id(&login_id)
                .await?
                .ok_or(AuthError::DuplicateLoginId),
            Err(e) => Err(e),
        }
    }

    async fn unused_nickname(&self) -> AuthResult<Nickname> {
        for _ in 0..NICKNAME_ATTEMPTS {
            let candidate = Nickname::generate();
            if !self.user_repo.exists_by_nickname(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(AuthError::DuplicateNickname)
    }
}
