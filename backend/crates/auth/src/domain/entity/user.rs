//! User Entity
//!
//! Identity record shared by local and social accounts. Local accounts hold
//! a password hash and no provider; social accounts the reverse.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email,
    login_id::LoginId,
    nickname::Nickname,
    social_provider::SocialProvider,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};

#[derive(Debug, Clone)]
pub struct User {
    /// Database-assigned id
    pub id: UserId,
    pub login_id: LoginId,
    /// `None` for social-only accounts
    pub password: Option<UserPassword>,
    pub email: Option<Email>,
    pub nickname: Nickname,
    /// `None` for local accounts
    pub social_provider: Option<SocialProvider>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Accounts created through a provider never log in with a password
    #[inline]
    pub fn is_social(&self) -> bool {
        self.social_provider.is_some()
    }

    /// False for social accounts and for accounts without a password hash
    pub fn verify_password(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        if self.is_social() {
            return false;
        }
        self.password
            .as_ref()
            .is_some_and(|hash| hash.verify(raw, pepper))
    }

    /// Every account signs in with the single `user` role
    pub fn roles(&self) -> Vec<UserRole> {
        vec![UserRole::User]
    }
}

/// User row before the database assigns its id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login_id: LoginId,
    pub password: Option<UserPassword>,
    pub email: Option<Email>,
    pub nickname: Nickname,
    pub social_provider: Option<SocialProvider>,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn local(login_id: LoginId, password: UserPassword, email: Email, nickname: Nickname) -> Self {
        Self {
            login_id,
            password: Some(password),
            email: Some(email),
            nickname,
            social_provider: None,
            created_at: Utc::now(),
        }
    }

    pub fn social(
        provider: SocialProvider,
        login_id: LoginId,
        email: Option<Email>,
        nickname: Nickname,
    ) -> Self {
        Self {
            login_id,
            password: None,
            email,
            nickname,
            social_provider: Some(provider),
            created_at: Utc::now(),
        }
    }

    /// Materialize with the id assigned on insert
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            login_id: self.login_id,
            password: self.password,
            email: self.email,
            nickname: self.nickname,
            social_provider: self.social_provider,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
