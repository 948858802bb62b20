//! Token pair issuance shared by password and social login

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::{refresh_token::NewRefreshToken, user::User};
use crate::domain::repository::RefreshTokenRepository;
use crate::domain::token_issuer::{IssuedToken, Principal, TokenIssuer};
use crate::error::AuthResult;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginTokens {
    pub user_id: UserId,
    pub access_token: IssuedToken,
    pub refresh_token: IssuedToken,
    /// Cookie `Max-Age` for the refresh token
    pub refresh_max_age_secs: i64,
}

/// Mint an access/refresh pair for `user` and persist the refresh token
pub(crate) async fn issue_tokens_and_store_refresh<R>(
    issuer: &TokenIssuer,
    refresh_repo: &R,
    user: &User,
    now: DateTime<Utc>,
) -> AuthResult<LoginTokens>
where
    R: RefreshTokenRepository,
{
    let principal = Principal::new(user.id, user.roles());
    let access_token = issuer.issue_access_token_at(&principal, now)?;
    let refresh_token = issuer.issue_refresh_token_at(now)?;

    refresh_repo
        .create(NewRefreshToken::new(
            refresh_token.token.clone(),
            user.id,
            refresh_token.expires_at,
            now,
        ))
        .await?;

    Ok(LoginTokens {
        user_id: user.id,
        refresh_max_age_secs: refresh_token.remaining_secs_at(now),
        access_token,
        refresh_token,
    })
}
