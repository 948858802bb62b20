//! Cookie Management Infrastructure
//!
//! Builds the http-only cookies that carry refresh tokens between the
//! browser and the API.

use axum_extra::extract::cookie::{self, Cookie};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }

    fn to_cookie(self) -> cookie::SameSite {
        match self {
            SameSite::Strict => cookie::SameSite::Strict,
            SameSite::Lax => cookie::SameSite::Lax,
            SameSite::None => cookie::SameSite::None,
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "refresh_token".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// Cookie carrying `value` that the browser keeps for `max_age_secs`
    pub fn build(&self, value: impl Into<String>, max_age_secs: i64) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value.into()))
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(self.same_site.to_cookie())
            .path(self.path.clone())
            .max_age(time::Duration::seconds(max_age_secs.max(0)))
            .build()
    }

    /// Expired cookie with the same name and path, clearing the browser copy
    pub fn removal(&self) -> Cookie<'static> {
        self.build(String::new(), 0)
    }
}
