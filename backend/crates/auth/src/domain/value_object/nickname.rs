//! Nickname Value Object
//!
//! Display name shown next to posts and comments. Unique across users and,
//! unlike the login ID, mutable.

use std::fmt;

use platform::crypto::random_alphanumeric;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{AuthError, AuthResult};

/// Maximum length for a nickname (in characters)
pub const NICKNAME_MAX_LENGTH: usize = 30;

/// Prefix of nicknames generated for new social accounts
pub const GENERATED_NICKNAME_PREFIX: &str = "guest_";

/// Random suffix length of generated nicknames
const GENERATED_NICKNAME_SUFFIX_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nickname(String);

impl Nickname {
    pub fn new(input: impl AsRef<str>) -> AuthResult<Self> {
        let normalized = input.as_ref().nfkc().collect::<String>().trim().to_string();

        if normalized.is_empty() {
            return Err(AuthError::Validation("Nickname is required".into()));
        }

        let length = normalized.chars().count();
        if length > NICKNAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Nickname is too long ({length} chars, maximum {NICKNAME_MAX_LENGTH})"
            )));
        }

        if normalized.chars().any(char::is_control) {
            return Err(AuthError::Validation(
                "Nickname cannot contain control characters".into(),
            ));
        }

        Ok(Self(normalized))
    }

    /// Random `guest_XXXXXXXX` nickname for auto-provisioned accounts
    pub fn generate() -> Self {
        Self(format!(
            "{GENERATED_NICKNAME_PREFIX}{}",
            random_alphanumeric(GENERATED_NICKNAME_SUFFIX_LENGTH)
        ))
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

impl TryFrom<String> for Nickname {
    type Error = AuthError;

    fn try_from(value: String) -> AuthResult<Self> {
        Self::new(value)
    }
}

impl From<Nickname> for String {
    fn from(value: Nickname) -> Self {
        value.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
