//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::{EmailCodeId, UserId};

use crate::domain::entity::{
    email_code::{EmailCode, NewEmailCode},
    refresh_token::{NewRefreshToken, RefreshToken},
    user::{NewUser, User},
};
use crate::domain::value_object::{
    email::Email, email_purpose::EmailPurpose, login_id::LoginId, nickname::Nickname,
    user_password::UserPassword,
};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user. A unique violation on login ID or nickname surfaces as
    /// `DuplicateLoginId` / `DuplicateNickname`.
    async fn create(&self, user: NewUser) -> AuthResult<User>;

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    async fn find_by_login_id(&self, login_id: &LoginId) -> AuthResult<Option<User>>;

    /// Oldest account using this address
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn find_by_email_and_login_id(
        &self,
        email: &Email,
        login_id: &LoginId,
    ) -> AuthResult<Option<User>>;

    async fn exists_by_login_id(&self, login_id: &LoginId) -> AuthResult<bool>;

    async fn exists_by_nickname(&self, nickname: &Nickname) -> AuthResult<bool>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    async fn update_password(&self, user_id: UserId, password: &UserPassword) -> AuthResult<()>;

    /// Set `password` only while the stored hash is still `current`.
    /// Returns whether a row changed.
    async fn swap_password(
        &self,
        user_id: UserId,
        current: &UserPassword,
        password: &UserPassword,
    ) -> AuthResult<bool>;
}

/// Refresh token store
#[trait_variant::make(RefreshTokenRepository: Send)]
pub trait LocalRefreshTokenRepository {
    async fn create(&self, token: NewRefreshToken) -> AuthResult<RefreshToken>;

    /// Latest-expiring row with this token string that is still valid at `now`
    async fn find_latest_valid_by_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<RefreshToken>>;

    /// Returns the number of rows deleted
    async fn delete_all_by_user_id(&self, user_id: UserId) -> AuthResult<u64>;
}

/// E-mail verification code store
#[trait_variant::make(EmailCodeRepository: Send)]
pub trait LocalEmailCodeRepository {
    async fn create(&self, code: NewEmailCode) -> AuthResult<EmailCode>;

    /// Most recently created row matching all three, regardless of age
    async fn find_latest_by_code_and_email_and_purpose(
        &self,
        code: &str,
        email: &Email,
        purpose: EmailPurpose,
    ) -> AuthResult<Option<EmailCode>>;

    async fn delete(&self, id: EmailCodeId) -> AuthResult<()>;
}

/// Everything the HTTP layer needs from one backing store
pub trait AuthStore:
    UserRepository + RefreshTokenRepository + EmailCodeRepository + Clone + Send + Sync + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository + RefreshTokenRepository + EmailCodeRepository + Clone + Send + Sync + 'static
{
}
