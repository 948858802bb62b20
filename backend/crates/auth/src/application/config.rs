//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::crypto::random_bytes;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use crate::domain::token_issuer::TokenIssuer;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 key for access and refresh tokens
    pub jwt_secret: Vec<u8>,
    /// Access token lifetime (30 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (2 weeks)
    pub refresh_token_ttl: Duration,
    /// Name of the cookie carrying the refresh token
    pub refresh_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Signup must present a valid `signup` e-mail code
    pub require_signup_email_code: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: vec![0u8; 32],
            access_token_ttl: Duration::from_secs(30 * 60),
            refresh_token_ttl: Duration::from_secs(14 * 24 * 3600),
            refresh_cookie_name: "refresh_token".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            require_signup_email_code: false,
        }
    }
}

impl AuthConfig {
    /// Upper bound for either token lifetime
    pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

    /// Create config with a random signing key (for development)
    pub fn with_random_secret() -> Self {
        Self {
            jwt_secret: random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Cookie settings for the refresh token
    pub fn refresh_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.refresh_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
        }
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(
            &self.jwt_secret,
            to_chrono(self.access_token_ttl),
            to_chrono(self.refresh_token_ttl),
        )
    }
}

fn to_chrono(duration: Duration) -> chrono::Duration {
    let capped = duration.min(AuthConfig::MAX_TOKEN_TTL);
    chrono::Duration::from_std(capped).unwrap_or(chrono::Duration::zero())
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("refresh_cookie_name", &self.refresh_cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("require_signup_email_code", &self.require_signup_email_code)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.access_token_ttl.as_secs(), 1800);
        assert_eq!(config.refresh_token_ttl.as_secs(), 1_209_600);
        assert_eq!(config.refresh_cookie_name, "refresh_token");
        assert!(config.cookie_secure);
        assert!(!config.require_signup_email_code);
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_development_config() {
        let dev = AuthConfig::development();
        assert!(!dev.cookie_secure);
        assert_eq!(dev.jwt_secret.len(), 32);
        assert_ne!(dev.jwt_secret, vec![0u8; 32]);
    }

    #[test]
    fn test_refresh_cookie_follows_config() {
        let config = AuthConfig {
            cookie_secure: false,
            cookie_same_site: SameSite::Strict,
            ..AuthConfig::default()
        };
        let cookie = config.refresh_cookie();
        assert_eq!(cookie.name, "refresh_token");
        assert!(!cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.same_site, SameSite::Strict);
        assert_eq!(cookie.path, "/");
    }

    #[test]
    fn test_token_issuer_lifetimes() {
        let issuer = AuthConfig::default().token_issuer();
        assert_eq!(issuer.access_ttl().num_seconds(), 1800);
        assert_eq!(issuer.refresh_ttl().num_seconds(), 1_209_600);
    }

    #[test]
    fn test_oversized_ttl_is_capped() {
        let config = AuthConfig {
            access_token_ttl: Duration::MAX,
            ..AuthConfig::default()
        };
        let issuer = config.token_issuer();
        let cap = AuthConfig::MAX_TOKEN_TTL.as_secs() as i64;
        assert_eq!(issuer.access_ttl().num_seconds(), cap);

        let token = issuer
            .issue_access_token(&crate::domain::token_issuer::Principal::user(
                kernel::id::UserId::new(1),
            ))
            .unwrap();
        assert!(token.expires_at > chrono::Utc::now());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AuthConfig::development()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("pepper\""));
        assert!(debug.contains("REDACTED"));
    }
}
