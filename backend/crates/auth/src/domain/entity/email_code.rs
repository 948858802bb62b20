//! Email Code Entity
//!
//! Six-digit verification code mailed to an address for one purpose. Valid
//! for three minutes from creation; a code created exactly three minutes ago
//! still verifies.

use chrono::{DateTime, Duration, Utc};
use kernel::id::EmailCodeId;
use platform::crypto::random_numeric_code;

use crate::domain::value_object::{email::Email, email_purpose::EmailPurpose};

/// Number of digits in a verification code
pub const EMAIL_CODE_LENGTH: usize = 6;

/// Validity window in seconds
pub const EMAIL_CODE_VALIDITY_SECS: i64 = 3 * 60;

#[inline]
pub fn email_code_validity() -> Duration {
    Duration::seconds(EMAIL_CODE_VALIDITY_SECS)
}

#[derive(Debug, Clone)]
pub struct EmailCode {
    pub id: EmailCodeId,
    pub code: String,
    pub email: Email,
    pub purpose: EmailPurpose,
    pub created_at: DateTime<Utc>,
}

impl EmailCode {
    /// Not created before `now - 3 min`
    #[inline]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.created_at >= now - email_code_validity()
    }
}

#[derive(Debug, Clone)]
pub struct NewEmailCode {
    pub code: String,
    pub email: Email,
    pub purpose: EmailPurpose,
    pub created_at: DateTime<Utc>,
}

impl NewEmailCode {
    /// Fresh random code for `email`
    pub fn generate(email: Email, purpose: EmailPurpose, now: DateTime<Utc>) -> Self {
        Self {
            code: random_numeric_code(EMAIL_CODE_LENGTH),
            email,
            purpose,
            created_at: now,
        }
    }

    pub fn into_email_code(self, id: EmailCodeId) -> EmailCode {
        EmailCode {
            id,
            code: self.code,
            email: self.email,
            purpose: self.purpose,
            created_at: self.created_at,
        }
    }
}
