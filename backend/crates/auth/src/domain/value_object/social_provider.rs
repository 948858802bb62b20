//! Social Login Providers
//!
//! Each provider returns user-info in its own shape. Extraction is a pure
//! function per variant over the raw JSON attributes.
//!
//! | Provider | id | email |
//! |---|---|---|
//! | Google | `sub` | `email` |
//! | Kakao | `id` (number) | `kakao_account.email` |
//! | Naver | `response.id` | `response.email` |

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    #[display("google")]
    Google,
    #[display("kakao")]
    Kakao,
    #[display("naver")]
    Naver,
}

impl SocialProvider {
    pub const ALL: [SocialProvider; 3] = [Self::Google, Self::Kakao, Self::Naver];

    /// Value stored in `users.social_provider` and used in login handles
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Kakao => "kakao",
            Self::Naver => "naver",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "google" => Some(Self::Google),
            "kakao" => Some(Self::Kakao),
            "naver" => Some(Self::Naver),
            _ => None,
        }
    }

    /// Endpoint that answers a bearer access token with user attributes
    pub const fn user_info_url(&self) -> &'static str {
        match self {
            Self::Google => "https://openidconnect.googleapis.com/v1/userinfo",
            Self::Kakao => "https://kapi.kakao.com/v2/user/me",
            Self::Naver => "https://openapi.naver.com/v1/nid/me",
        }
    }

    /// Stable provider-side user id
    pub fn extract_id(&self, attributes: &Value) -> Option<String> {
        let raw = match self {
            Self::Google => attributes.get("sub"),
            Self::Kakao => attributes.get("id"),
            Self::Naver => attributes.get("response").and_then(|r| r.get("id")),
        }?;

        let id = match raw {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };

        (!id.is_empty()).then_some(id)
    }

    pub fn extract_email(&self, attributes: &Value) -> Option<String> {
        let raw = match self {
            Self::Google => attributes.get("email"),
            Self::Kakao => attributes
                .get("kakao_account")
                .and_then(|account| account.get("email")),
            Self::Naver => attributes.get("response").and_then(|r| r.get("email")),
        }?;

        raw.as_str()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string)
    }

    /// Login handle of the account linked to `provider_id`
    pub fn login_handle(&self, provider_id: &str) -> String {
        format!("{}_{}", self.code(), provider_id)
    }
}

impl FromStr for SocialProvider {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(&s.to_ascii_lowercase())
            .ok_or_else(|| AuthError::Validation(format!("Unsupported social provider: {s}")))
    }
}
