//! Get Current User Use Case

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::token_issuer::Principal;
use crate::error::{AuthError, AuthResult};

pub struct GetCurrentUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetCurrentUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// A principal whose user no longer exists is treated as an invalid token
    pub async fn execute(&self, principal: &Principal) -> AuthResult<User> {
        self.user_repo
            .find_by_id(principal.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }
}
