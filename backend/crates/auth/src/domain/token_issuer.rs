//! Token Issuer
//!
//! Mints and verifies HS256-signed JWTs. One symmetric key signs both kinds:
//!
//! - **access**: `sub` (user id), `roles` (comma-joined), `iat`, `exp`
//! - **refresh**: `jti` (random), `iat`, `exp`; no subject, the owning user
//!   is resolved through the refresh token store
//!
//! Every method has an `*_at(now)` variant so the clock can be pinned.
//! A token checked at exactly `exp` is still valid; one second later it is
//! `ExpiredToken`.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

const ACCESS_TYPE: &str = "access";
const REFRESH_TYPE: &str = "refresh";

/// Authenticated identity derived from a verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub roles: Vec<UserRole>,
}

impl Principal {
    pub fn new(user_id: UserId, roles: Vec<UserRole>) -> Self {
        Self { user_id, roles }
    }

    /// Principal with the single `user` role
    pub fn user(user_id: UserId) -> Self {
        Self::new(user_id, vec![UserRole::User])
    }
}

/// Signed token and its absolute expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Whole seconds left at `now`, never negative
    pub fn remaining_secs_at(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

#[derive(Serialize)]
struct AccessClaims<'a> {
    sub: String,
    roles: String,
    iat: i64,
    exp: i64,
    typ: &'a str,
}

#[derive(Serialize)]
struct RefreshClaims<'a> {
    jti: String,
    iat: i64,
    exp: i64,
    typ: &'a str,
}

/// Claims as found in an incoming token; anything may be missing
#[derive(Deserialize)]
struct IncomingClaims {
    sub: Option<String>,
    roles: Option<String>,
    exp: Option<i64>,
    typ: Option<String>,
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by hand against the injected clock
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    #[inline]
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    #[inline]
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn issue_access_token(&self, principal: &Principal) -> AuthResult<IssuedToken> {
        self.issue_access_token_at(principal, Utc::now())
    }

    pub fn issue_access_token_at(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> AuthResult<IssuedToken> {
        let expires_at = now + self.access_ttl;
        let claims = AccessClaims {
            sub: principal.user_id.to_string(),
            roles: UserRole::join(&principal.roles),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            typ: ACCESS_TYPE,
        };

        Ok(IssuedToken {
            token: self.sign(&claims)?,
            expires_at,
        })
    }

    pub fn issue_refresh_token(&self) -> AuthResult<IssuedToken> {
        self.issue_refresh_token_at(Utc::now())
    }

    pub fn issue_refresh_token_at(&self, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let expires_at = now + self.refresh_ttl;
        let claims = RefreshClaims {
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            typ: REFRESH_TYPE,
        };

        Ok(IssuedToken {
            token: self.sign(&claims)?,
            expires_at,
        })
    }

    pub fn parse_and_authenticate(&self, token: &str) -> AuthResult<Principal> {
        self.parse_and_authenticate_at(token, Utc::now())
    }

    /// `InvalidToken` for bad format, signature, algorithm or claims;
    /// `ExpiredToken` when the signature holds but `now > exp`
    pub fn parse_and_authenticate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<Principal> {
        let claims = decode::<IncomingClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                AuthError::InvalidToken
            })?
            .claims;

        if claims.typ.as_deref() != Some(ACCESS_TYPE) {
            return Err(AuthError::InvalidToken);
        }

        let user_id = claims
            .sub
            .as_deref()
            .and_then(|sub| sub.parse::<UserId>().ok())
            .ok_or(AuthError::InvalidToken)?;

        let roles = claims
            .roles
            .as_deref()
            .and_then(UserRole::split)
            .ok_or(AuthError::InvalidToken)?;

        // Expiry last, so only a well-formed access token reports ExpiredToken
        let exp = claims.exp.ok_or(AuthError::InvalidToken)?;
        if now.timestamp() > exp {
            return Err(AuthError::ExpiredToken);
        }

        Ok(Principal::new(user_id, roles))
    }

    pub fn validate(&self, token: &str) -> AuthResult<()> {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<()> {
        self.parse_and_authenticate_at(token, now).map(|_| ())
    }

    fn sign<T: Serialize>(&self, claims: &T) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("JWT encode failed: {e}")))
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("key", &"[REDACTED]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, Duration::seconds(1800), Duration::seconds(1_209_600))
    }

    #[test]
    fn test_access_token_roundtrip() {
        let issuer = issuer();
        let principal = Principal::new(UserId::new(17), vec![UserRole::User, UserRole::Admin]);

        let issued = issuer.issue_access_token(&principal).unwrap();
        let parsed = issuer.parse_and_authenticate(&issued.token).unwrap();

        assert_eq!(parsed, principal);
        assert!(issuer.validate(&issued.token).is_ok());
    }

    #[test]
    fn test_expiry_boundary() {
        let issuer = issuer();
        let issued_at = Utc::now();
        let issued = issuer
            .issue_access_token_at(&Principal::user(UserId::new(1)), issued_at)
            .unwrap();

        let at_exp = issued_at + Duration::seconds(1800);
        assert!(issuer.parse_and_authenticate_at(&issued.token, at_exp).is_ok());

        let after_exp = at_exp + Duration::seconds(1);
        assert!(matches!(
            issuer.parse_and_authenticate_at(&issued.token, after_exp),
            Err(AuthError::ExpiredToken)
        ));
        assert!(matches!(
            issuer.validate_at(&issued.token, after_exp),
            Err(AuthError::ExpiredToken)
        ));
    }

    #[test]
    fn test_wrong_signature_is_invalid() {
        let other = TokenIssuer::new(
            b"another-secret-another-secret-!!",
            Duration::seconds(60),
            Duration::seconds(60),
        );
        let issued = other
            .issue_access_token(&Principal::user(UserId::new(1)))
            .unwrap();

        assert!(matches!(
            issuer().parse_and_authenticate(&issued.token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_with_wrong_signature_is_invalid_not_expired() {
        let other = TokenIssuer::new(b"other", Duration::seconds(1), Duration::seconds(1));
        let now = Utc::now();
        let issued = other
            .issue_access_token_at(&Principal::user(UserId::new(1)), now)
            .unwrap();

        assert!(matches!(
            issuer().parse_and_authenticate_at(&issued.token, now + Duration::days(1)),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        for garbage in ["", "abc", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30."] {
            assert!(matches!(
                issuer().parse_and_authenticate(garbage),
                Err(AuthError::InvalidToken)
            ));
        }
    }

    #[test]
    fn test_unsupported_algorithm_is_invalid() {
        let now = Utc::now().timestamp();
        let claims = serde_json::json!({
            "sub": "1", "roles": "user", "iat": now, "exp": now + 60, "typ": "access"
        });
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            issuer().parse_and_authenticate(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_missing_or_malformed_claims_are_invalid() {
        let now = Utc::now().timestamp();
        let cases = [
            serde_json::json!({ "roles": "user", "exp": now + 60, "typ": "access" }),
            serde_json::json!({ "sub": "1", "exp": now + 60, "typ": "access" }),
            serde_json::json!({ "sub": "alice", "roles": "user", "exp": now + 60, "typ": "access" }),
            serde_json::json!({ "sub": "1", "roles": "owner", "exp": now + 60, "typ": "access" }),
            serde_json::json!({ "sub": "1", "roles": "user", "typ": "access" }),
        ];

        for claims in cases {
            let token = encode(
                &Header::new(Algorithm::HS256),
                &claims,
                &EncodingKey::from_secret(SECRET),
            )
            .unwrap();
            assert!(
                matches!(
                    issuer().parse_and_authenticate(&token),
                    Err(AuthError::InvalidToken)
                ),
                "{claims}"
            );
        }
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let issuer = issuer();
        let refresh = issuer.issue_refresh_token().unwrap();
        assert!(matches!(
            issuer.parse_and_authenticate(&refresh.token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_refresh_token_is_invalid_not_expired() {
        let issuer = issuer();
        let issued_at = Utc::now() - Duration::days(30);
        let refresh = issuer.issue_refresh_token_at(issued_at).unwrap();
        assert!(matches!(
            issuer.parse_and_authenticate(&refresh.token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_refresh_tokens_are_unique_within_a_second() {
        let issuer = issuer();
        let now = Utc::now();
        let a = issuer.issue_refresh_token_at(now).unwrap();
        let b = issuer.issue_refresh_token_at(now).unwrap();

        assert_ne!(a.token, b.token);
        assert_eq!(a.expires_at, now + Duration::seconds(1_209_600));
        assert_eq!(a.remaining_secs_at(now), 1_209_600);
    }

    #[test]
    fn test_debug_hides_key() {
        let debug = format!("{:?}", issuer());
        assert!(debug.contains("REDACTED"));
    }
}
