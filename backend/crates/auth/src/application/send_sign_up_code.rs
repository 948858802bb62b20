//! Send Sign Up Code Use Case
//!
//! Mails a verification code to an address that is not yet registered.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::mail::{MailMessage, MailSender};

use crate::domain::entity::email_code::{EMAIL_CODE_VALIDITY_SECS, NewEmailCode};
use crate::domain::repository::{EmailCodeRepository, UserRepository};
use crate::domain::value_object::{email::Email, email_purpose::EmailPurpose};
use crate::error::{AuthError, AuthResult};

pub struct SendSignUpCodeUseCase<U, C, M>
where
    U: UserRepository,
    C: EmailCodeRepository,
    M: MailSender,
{
    user_repo: Arc<U>,
    code_repo: Arc<C>,
    mailer: Arc<M>,
}

impl<U, C, M> SendSignUpCodeUseCase<U, C, M>
where
    U: UserRepository,
    C: EmailCodeRepository,
    M: MailSender,
{
    pub fn new(user_repo: Arc<U>, code_repo: Arc<C>, mailer: Arc<M>) -> Self {
        Self {
            user_repo,
            code_repo,
            mailer,
        }
    }

    pub async fn execute(&self, email: &str) -> AuthResult<()> {
        self.execute_at(email, Utc::now()).await
    }

    pub async fn execute_at(&self, email: &str, now: DateTime<Utc>) -> AuthResult<()> {
        let email = Email::new(email)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let purpose = EmailPurpose::Signup;
        let code = self
            .code_repo
            .create(NewEmailCode::generate(email, purpose, now))
            .await?;

        let message = MailMessage::new(code.email.as_str(), purpose.mail_template())
            .with_variable("code", code.code.as_str())
            .with_variable("expiresInMinutes", (EMAIL_CODE_VALIDITY_SECS / 60).to_string());

        if let Err(e) = self.mailer.send(&message).await {
            if let Err(cleanup) = self.code_repo.delete(code.id).await {
                tracing::warn!(error = %cleanup, "Failed to discard unsent email code");
            }
            return Err(e.into());
        }

        tracing::info!(email_domain = %code.email.domain(), "Signup code sent");
        Ok(())
    }
}
