//! Email Code Purpose
//!
//! Tags a verification code with the flow that issued it. A code only
//! verifies within its own flow.

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum EmailPurpose {
    #[display("signup")]
    Signup,
    #[display("find_login_id")]
    FindLoginId,
}

impl EmailPurpose {
    /// Value stored in `email_codes.purpose`
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::FindLoginId => "find_login_id",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "signup" => Some(Self::Signup),
            "find_login_id" => Some(Self::FindLoginId),
            _ => None,
        }
    }

    /// Mail template that delivers codes for this purpose
    #[inline]
    pub const fn mail_template(&self) -> &'static str {
        match self {
            Self::Signup => "signup-code",
            Self::FindLoginId => "find-login-id",
        }
    }
}
