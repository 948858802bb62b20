use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role carried in the access token's `roles` claim
///
/// Every account signs in as [`UserRole::User`]; `Admin` is only ever
/// granted out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "user" => Some(UserRole::User),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Comma-joined codes, the `roles` claim format
    pub fn join(roles: &[UserRole]) -> String {
        roles
            .iter()
            .map(UserRole::code)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Inverse of [`UserRole::join`]; `None` if any entry is unknown or the
    /// list is empty
    pub fn split(joined: &str) -> Option<Vec<UserRole>> {
        if joined.trim().is_empty() {
            return None;
        }
        joined
            .split(',')
            .map(|code| UserRole::from_code(code.trim()))
            .collect()
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::from_code(s).ok_or_else(|| format!("Unknown role: {s}"))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
