//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{EmailCodeId, RefreshTokenId, UserId};
use sqlx::PgPool;

use crate::domain::entity::{
    email_code::{EmailCode, NewEmailCode, email_code_validity},
    refresh_token::{NewRefreshToken, RefreshToken},
    user::{NewUser, User},
};
use crate::domain::repository::{EmailCodeRepository, RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, email_purpose::EmailPurpose, login_id::LoginId, nickname::Nickname,
    social_provider::SocialProvider, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

const USERS_LOGIN_ID_KEY: &str = "users_login_id_key";
const USERS_NICKNAME_KEY: &str = "users_nickname_key";

const USER_COLUMNS: &str =
    "id, login_id, password_hash, email, nickname, social_provider, created_at, updated_at";

/// Rows removed by one expiry sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub refresh_tokens: u64,
    pub email_codes: u64,
}

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete expired refresh tokens and e-mail codes past their window
    pub async fn cleanup_expired(&self) -> AuthResult<SweepReport> {
        self.cleanup_expired_at(Utc::now()).await
    }

    pub async fn cleanup_expired_at(&self, now: DateTime<Utc>) -> AuthResult<SweepReport> {
        let refresh_tokens = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        let email_codes = sqlx::query("DELETE FROM email_codes WHERE created_at < $1")
            .bind(now - email_code_validity())
            .execute(&self.pool)
            .await?
            .rows_affected();

        let report = SweepReport {
            refresh_tokens,
            email_codes,
        };

        tracing::debug!(
            refresh_tokens_deleted = report.refresh_tokens,
            email_codes_deleted = report.email_codes,
            "Swept expired auth rows"
        );

        Ok(report)
    }

    async fn fetch_user(&self, filter: &str, binds: &[&str]) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {filter} ORDER BY id LIMIT 1");
        let mut query = sqlx::query_as::<_, UserRow>(&sql);
        for value in binds {
            query = query.bind(*value);
        }

        query
            .fetch_optional(&self.pool)
            .await?
            .map(UserRow::into_user)
            .transpose()
    }
}

/// Unique violations on `users` become the matching duplicate error
fn map_user_insert_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        match db_err.constraint() {
            Some(USERS_LOGIN_ID_KEY) => return AuthError::DuplicateLoginId,
            Some(USERS_NICKNAME_KEY) => return AuthError::DuplicateNickname,
            _ => {}
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (
                login_id,
                password_hash,
                email,
                nickname,
                social_provider,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id
            "#,
        )
        .bind(user.login_id.as_str())
        .bind(user.password.as_ref().map(UserPassword::as_phc_string))
        .bind(user.email.as_ref().map(Email::as_str))
        .bind(user.nickname.as_str())
        .bind(user.social_provider.map(|p| p.code()))
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_insert_error)?;

        Ok(user.into_user(UserId::new(id)))
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_login_id(&self, login_id: &LoginId) -> AuthResult<Option<User>> {
        self.fetch_user("login_id = $1", &[login_id.as_str()]).await
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.fetch_user("email = $1", &[email.as_str()]).await
    }

    async fn find_by_email_and_login_id(
        &self,
        email: &Email,
        login_id: &LoginId,
    ) -> AuthResult<Option<User>> {
        self.fetch_user(
            "email = $1 AND login_id = $2",
            &[email.as_str(), login_id.as_str()],
        )
        .await
    }

    async fn exists_by_login_id(&self, login_id: &LoginId) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE login_id = $1)",
        )
        .bind(login_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_nickname(&self, nickname: &Nickname) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE nickname = $1)",
        )
        .bind(nickname.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update_password(&self, user_id: UserId, password: &UserPassword) -> AuthResult<()> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
            .bind(user_id.value())
            .bind(password.as_phc_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn swap_password(
        &self,
        user_id: UserId,
        current: &UserPassword,
        password: &UserPassword,
    ) -> AuthResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $3, updated_at = now() \
             WHERE id = $1 AND password_hash = $2",
        )
        .bind(user_id.value())
        .bind(current.as_phc_string())
        .bind(password.as_phc_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

// ============================================================================
// Refresh Token Repository Implementation
// ============================================================================

impl RefreshTokenRepository for PgAuthRepository {
    async fn create(&self, token: NewRefreshToken) -> AuthResult<RefreshToken> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&token.token)
        .bind(token.user_id.value())
        .bind(token.expires_at)
        .bind(token.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(token.into_refresh_token(RefreshTokenId::new(id)))
    }

    async fn find_latest_valid_by_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<RefreshToken>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT id, token, user_id, expires_at, created_at
            FROM refresh_tokens
            WHERE token = $1 AND expires_at > $2
            ORDER BY expires_at DESC
            LIMIT 1
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RefreshTokenRow::into_refresh_token))
    }

    async fn delete_all_by_user_id(&self, user_id: UserId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Email Code Repository Implementation
// ============================================================================

impl EmailCodeRepository for PgAuthRepository {
    async fn create(&self, code: NewEmailCode) -> AuthResult<EmailCode> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO email_codes (code, email, purpose, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&code.code)
        .bind(code.email.as_str())
        .bind(code.purpose.code())
        .bind(code.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(code.into_email_code(EmailCodeId::new(id)))
    }

    async fn find_latest_by_code_and_email_and_purpose(
        &self,
        code: &str,
        email: &Email,
        purpose: EmailPurpose,
    ) -> AuthResult<Option<EmailCode>> {
        let row = sqlx::query_as::<_, EmailCodeRow>(
            r#"
            SELECT id, code, email, purpose, created_at
            FROM email_codes
            WHERE code = $1 AND email = $2 AND purpose = $3
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(code)
        .bind(email.as_str())
        .bind(purpose.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(EmailCodeRow::into_email_code).transpose()
    }

    async fn delete(&self, id: EmailCodeId) -> AuthResult<()> {
        sqlx::query("DELETE FROM email_codes WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    login_id: String,
    password_hash: Option<String>,
    email: Option<String>,
    nickname: String,
    social_provider: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password = self
            .password_hash
            .map(UserPassword::from_phc_string)
            .transpose()?;

        let social_provider = self
            .social_provider
            .map(|code| {
                SocialProvider::from_code(&code)
                    .ok_or_else(|| AuthError::Internal(format!("Invalid social_provider: {code}")))
            })
            .transpose()?;

        Ok(User {
            id: UserId::new(self.id),
            login_id: LoginId::from_db(self.login_id),
            password,
            email: self.email.map(Email::from_db),
            nickname: Nickname::from_db(self.nickname),
            social_provider,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    id: i64,
    token: String,
    user_id: i64,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl RefreshTokenRow {
    fn into_refresh_token(self) -> RefreshToken {
        RefreshToken {
            id: RefreshTokenId::new(self.id),
            token: self.token,
            user_id: UserId::new(self.user_id),
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EmailCodeRow {
    id: i64,
    code: String,
    email: String,
    purpose: String,
    created_at: DateTime<Utc>,
}

impl EmailCodeRow {
    fn into_email_code(self) -> AuthResult<EmailCode> {
        let purpose = EmailPurpose::from_code(&self.purpose)
            .ok_or_else(|| AuthError::Internal(format!("Invalid email code purpose: {}", self.purpose)))?;

        Ok(EmailCode {
            id: EmailCodeId::new(self.id),
            code: self.code,
            email: Email::from_db(self.email),
            purpose,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};

    #[derive(Debug, thiserror::Error)]
    #[error("duplicate key value violates unique constraint")]
    struct ConstraintError {
        unique: bool,
        constraint: Option<&'static str>,
    }

    impl DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::NotNullViolation
            }
        }
    }

    fn db_error(unique: bool, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintError { unique, constraint }))
    }

    #[test]
    fn test_unique_violations_map_by_constraint() {
        assert!(matches!(
            map_user_insert_error(db_error(true, Some(USERS_LOGIN_ID_KEY))),
            AuthError::DuplicateLoginId
        ));
        assert!(matches!(
            map_user_insert_error(db_error(true, Some(USERS_NICKNAME_KEY))),
            AuthError::DuplicateNickname
        ));
    }

    #[test]
    fn test_other_database_errors_pass_through() {
        assert!(matches!(
            map_user_insert_error(db_error(true, Some("users_pkey"))),
            AuthError::Database(_)
        ));
        assert!(matches!(
            map_user_insert_error(db_error(false, Some(USERS_LOGIN_ID_KEY))),
            AuthError::Database(_)
        ));
        assert!(matches!(
            map_user_insert_error(sqlx::Error::RowNotFound),
            AuthError::Database(_)
        ));
    }
}
