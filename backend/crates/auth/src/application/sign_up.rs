//! Sign Up Use Case
//!
//! Creates a local (password) account.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::{EmailCodeRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    email_purpose::EmailPurpose,
    login_id::LoginId,
    nickname::Nickname,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub login_id: String,
    pub email: String,
    pub email_code: String,
    pub password: String,
    pub password_confirm: String,
    pub nickname: String,
}

pub struct SignUpOutput {
    pub user_id: UserId,
}

pub struct SignUpUseCase<U, C>
where
    U: UserRepository,
    C: EmailCodeRepository,
{
    user_repo: Arc<U>,
    code_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> SignUpUseCase<U, C>
where
    U: UserRepository,
    C: EmailCodeRepository,
{
    pub fn new(user_repo: Arc<U>, code_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            code_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        self.execute_at(input, Utc::now()).await
    }

    /// Checks run in a fixed order and the first failure wins: login ID,
    /// nickname, password confirmation, then the e-mail code when required
    pub async fn execute_at(&self, input: SignUpInput, now: DateTime<Utc>) -> AuthResult<SignUpOutput> {
        let login_id = LoginId::new(&input.login_id)?;
        let email = Email::new(&input.email)?;
        let email_code = input.email_code.trim().to_string();
        if email_code.is_empty() {
            return Err(AuthError::Validation("Email code is required".into()));
        }
        let password = RawPassword::new(input.password)?;
        let password_confirm = RawPassword::new(input.password_confirm)?;
        let nickname = Nickname::new(&input.nickname)?;

        if self.user_repo.exists_by_login_id(&login_id).await? {
            return Err(AuthError::DuplicateLoginId);
        }

        if self.user_repo.exists_by_nickname(&nickname).await? {
            return Err(AuthError::DuplicateNickname);
        }

        if !password.matches(&password_confirm) {
            return Err(AuthError::PasswordMismatch);
        }

        if self.config.require_signup_email_code {
            let verified = self
                .code_repo
                .find_latest_by_code_and_email_and_purpose(&email_code, &email, EmailPurpose::Signup)
                .await?
                .is_some_and(|code| code.is_valid_at(now));
            if !verified {
                return Err(AuthError::InvalidCode);
            }
        }

        let password_hash = UserPassword::from_raw(&password, self.config.pepper())?;
        let user = self
            .user_repo
            .create(NewUser::local(login_id, password_hash, email, nickname))
            .await?;

        tracing::info!(
            user_id = %user.id,
            login_id = %user.login_id,
            "User signed up"
        );

        Ok(SignUpOutput { user_id: user.id })
    }
}
