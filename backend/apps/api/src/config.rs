//! Server Configuration
//!
//! Everything is read from the environment (a `.env` file is loaded first).
//! Debug builds fall back to a random signing key when `JWT_SECRET` is unset.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;
const MIN_JWT_SECRET_LEN: usize = 32;

/// Mail relay settings; absent when mail is only logged
#[derive(Clone)]
pub struct MailRelayConfig {
    pub endpoint: String,
    pub api_key: String,
    pub from: String,
}

impl fmt::Debug for MailRelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailRelayConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub sweep_interval: Duration,
    pub mail: Option<MailRelayConfig>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let bind_addr = var_or("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins = var_or("FRONTEND_ORIGINS", DEFAULT_FRONTEND_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let sweep_interval = Duration::from_secs(parse_or(
            "SWEEP_INTERVAL_SECS",
            DEFAULT_SWEEP_INTERVAL_SECS,
        )?);
        if sweep_interval.is_zero() {
            bail!("SWEEP_INTERVAL_SECS must be positive");
        }

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            sweep_interval,
            mail: mail_relay_from_env()?,
            auth: auth_from_env()?,
        })
    }
}

fn auth_from_env() -> anyhow::Result<AuthConfig> {
    let base = match env::var("JWT_SECRET") {
        Ok(secret_b64) => {
            let jwt_secret = decode_secret(&secret_b64).context("JWT_SECRET must be base64")?;
            if jwt_secret.len() < MIN_JWT_SECRET_LEN {
                bail!("JWT_SECRET must decode to at least {MIN_JWT_SECRET_LEN} bytes");
            }
            AuthConfig {
                jwt_secret,
                ..AuthConfig::default()
            }
        }
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, using a random key for this process");
            AuthConfig::development()
        }
        Err(_) => bail!("JWT_SECRET must be set in production"),
    };

    let password_pepper = match env::var("PASSWORD_PEPPER") {
        Ok(pepper_b64) => Some(decode_secret(&pepper_b64).context("PASSWORD_PEPPER must be base64")?),
        Err(_) => None,
    };

    Ok(AuthConfig {
        access_token_ttl: token_ttl(
            "JWT_ACCESS_TTL_SECONDS",
            parse_or("JWT_ACCESS_TTL_SECONDS", base.access_token_ttl.as_secs())?,
        )?,
        refresh_token_ttl: token_ttl(
            "JWT_REFRESH_TTL_SECONDS",
            parse_or("JWT_REFRESH_TTL_SECONDS", base.refresh_token_ttl.as_secs())?,
        )?,
        cookie_secure: parse_or("COOKIE_SECURE", base.cookie_secure)?,
        require_signup_email_code: parse_or(
            "REQUIRE_SIGNUP_EMAIL_CODE",
            base.require_signup_email_code,
        )?,
        password_pepper,
        ..base
    })
}

fn mail_relay_from_env() -> anyhow::Result<Option<MailRelayConfig>> {
    let Ok(endpoint) = env::var("MAIL_API_URL") else {
        return Ok(None);
    };

    Ok(Some(MailRelayConfig {
        endpoint,
        api_key: env::var("MAIL_API_KEY").context("MAIL_API_KEY must be set with MAIL_API_URL")?,
        from: env::var("MAIL_FROM").context("MAIL_FROM must be set with MAIL_API_URL")?,
    }))
}

/// Token lifetimes must be positive and at most [`AuthConfig::MAX_TOKEN_TTL`]
fn token_ttl(key: &str, secs: u64) -> anyhow::Result<Duration> {
    let ttl = Duration::from_secs(secs);
    if ttl.is_zero() || ttl > AuthConfig::MAX_TOKEN_TTL {
        bail!(
            "{key} must be between 1 and {} seconds",
            AuthConfig::MAX_TOKEN_TTL.as_secs()
        );
    }
    Ok(ttl)
}

fn decode_secret(value: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(value.trim())
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
