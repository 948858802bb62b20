//! Login ID Value Object
//!
//! The unique, immutable handle a user logs in with. Local accounts choose
//! it at signup; social accounts get `"{provider}_{provider_id}"`.
//!
//! Input is NFKC-normalized and trimmed. Case is preserved and matching is
//! exact.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{AuthError, AuthResult};

/// Maximum length for a login ID (in characters)
pub const LOGIN_ID_MAX_LENGTH: usize = 100;

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoginId(String);

impl LoginId {
    pub fn new(input: impl AsRef<str>) -> AuthResult<Self> {
        let normalized = input.as_ref().nfkc().collect::<String>().trim().to_string();

        if normalized.is_empty() {
            return Err(AuthError::Validation("Login ID is required".into()));
        }

        let length = normalized.chars().count();
        if length > LOGIN_ID_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Login ID is too long ({length} chars, maximum {LOGIN_ID_MAX_LENGTH})"
            )));
        }

        if normalized
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(AuthError::Validation(
                "Login ID cannot contain whitespace or control characters".into(),
            ));
        }

        Ok(Self(normalized))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LoginId {
    type Error = AuthError;

    fn try_from(value: String) -> AuthResult<Self> {
        Self::new(value)
    }
}

impl From<LoginId> for String {
    fn from(value: LoginId) -> Self {
        value.0
    }
}

impl fmt::Debug for LoginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoginId").field(&self.0).finish()
    }
}

impl fmt::Display for LoginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LoginId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
