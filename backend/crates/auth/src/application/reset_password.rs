//! Reset Password Use Case
//!
//! Replaces the password of the account matching (login ID, e-mail) with a
//! random one and mails it. If the mail cannot be sent the previous hash is
//! written back, unless another reset has replaced the hash in the meantime.

use std::sync::Arc;

use platform::mail::{MailMessage, MailSender};

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    login_id::LoginId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

const RESET_PASSWORD_TEMPLATE: &str = "reset-password";

pub struct ResetPasswordInput {
    pub login_id: String,
    pub email: String,
}

pub struct ResetPasswordUseCase<U, M>
where
    U: UserRepository,
    M: MailSender,
{
    user_repo: Arc<U>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, M> ResetPasswordUseCase<U, M>
where
    U: UserRepository,
    M: MailSender,
{
    pub fn new(user_repo: Arc<U>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<()> {
        let login_id = LoginId::new(&input.login_id)?;
        let email = Email::new(&input.email)?;

        let user = self
            .user_repo
            .find_by_email_and_login_id(&email, &login_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        // Social accounts have no password to replace
        let previous = match (&user.password, user.is_social()) {
            (Some(hash), false) => hash.clone(),
            _ => return Err(AuthError::AccountNotFound),
        };

        let generated = RawPassword::generate();
        let new_hash = UserPassword::from_raw(&generated, self.config.pepper())?;
        self.user_repo.update_password(user.id, &new_hash).await?;

        let message = MailMessage::new(email.as_str(), RESET_PASSWORD_TEMPLATE)
            .with_variable("loginId", user.login_id.as_str())
            .with_variable("password", generated.expose_secret());

        if let Err(e) = self.mailer.send(&message).await {
            match self
                .user_repo
                .swap_password(user.id, &new_hash, &previous)
                .await
            {
                Ok(true) => {}
                Ok(false) => tracing::warn!(
                    user_id = %user.id,
                    "Password changed during failed reset; keeping the newer hash"
                ),
                Err(restore) => tracing::error!(
                    user_id = %user.id,
                    error = %restore,
                    "Failed to restore password after mail failure"
                ),
            }
            return Err(e.into());
        }

        tracing::info!(user_id = %user.id, "Password reset and mailed");
        Ok(())
    }
}
