//! Find Login ID Use Case
//!
//! Two steps: mail a code to a registered address, then trade
//! (e-mail, code) for the login ID within three minutes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::mail::{MailMessage, MailSender};

use crate::domain::entity::email_code::{EMAIL_CODE_VALIDITY_SECS, NewEmailCode};
use crate::domain::repository::{EmailCodeRepository, UserRepository};
use crate::domain::value_object::{email::Email, email_purpose::EmailPurpose, login_id::LoginId};
use crate::error::{AuthError, AuthResult};

const PURPOSE: EmailPurpose = EmailPurpose::FindLoginId;

pub struct FindLoginIdUseCase<U, C, M>
where
    U: UserRepository,
    C: EmailCodeRepository,
    M: MailSender,
{
    user_repo: Arc<U>,
    code_repo: Arc<C>,
    mailer: Arc<M>,
}

impl<U, C, M> FindLoginIdUseCase<U, C, M>
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

    /// Step 1
    pub async fn send_code(&self, email: &str) -> AuthResult<()> {
        self.send_code_at(email, Utc::now()).await
    }

    pub async fn send_code_at(&self, email: &str, now: DateTime<Utc>) -> AuthResult<()> {
        let email = Email::new(email)?;

        if !self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailNotFound);
        }

        let code = self
            .code_repo
            .create(NewEmailCode::generate(email, PURPOSE, now))
            .await?;

        let message = MailMessage::new(code.email.as_str(), PURPOSE.mail_template())
            .with_variable("code", code.code.as_str())
            .with_variable("expiresInMinutes", (EMAIL_CODE_VALIDITY_SECS / 60).to_string());

        if let Err(e) = self.mailer.send(&message).await {
            if let Err(cleanup) = self.code_repo.delete(code.id).await {
                tracing::warn!(error = %cleanup, "Failed to discard unsent email code");
            }
            return Err(e.into());
        }

        tracing::info!(email_domain = %code.email.domain(), "Find-ID code sent");
        Ok(())
    }

    /// Step 2
    pub async fn verify_code(&self, email: &str, code: &str) -> AuthResult<LoginId> {
        self.verify_code_at(email, code, Utc::now()).await
    }

    pub async fn verify_code_at(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<LoginId> {
        let email = Email::new(email)?;
        let code = code.trim();
        if code.is_empty() {
            return Err(AuthError::Validation("Code is required".into()));
        }

        let verified = self
            .code_repo
            .find_latest_by_code_and_email_and_purpose(code, &email, PURPOSE)
            .await?
            .is_some_and(|stored| stored.is_valid_at(now));
        if !verified {
            return Err(AuthError::InvalidCode);
        }

        // The address may have changed hands since step 1
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::EmailNotFound)?;

        Ok(user.login_id)
    }
}
