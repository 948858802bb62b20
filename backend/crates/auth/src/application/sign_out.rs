//! Sign Out Use Case
//!
//! Revokes every refresh token of the authenticated user, not only the one
//! in the current cookie. Access tokens already issued stay valid until
//! they expire.

use std::sync::Arc;

use crate::domain::repository::RefreshTokenRepository;
use crate::domain::token_issuer::Principal;
use crate::error::AuthResult;

pub struct SignOutUseCase<R>
where
    R: RefreshTokenRepository,
{
    refresh_repo: Arc<R>,
}

impl<R> SignOutUseCase<R>
where
    R: RefreshTokenRepository,
{
    pub fn new(refresh_repo: Arc<R>) -> Self {
        Self { refresh_repo }
    }

    /// Returns the number of refresh tokens revoked
    pub async fn execute(&self, principal: &Principal) -> AuthResult<u64> {
        let deleted = self
            .refresh_repo
            .delete_all_by_user_id(principal.user_id)
            .await?;

        tracing::info!(
            user_id = %principal.user_id,
            revoked = deleted,
            "User signed out from all sessions"
        );

        Ok(deleted)
    }
}
