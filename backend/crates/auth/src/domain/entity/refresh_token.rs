//! Refresh Token Entity
//!
//! One outstanding refresh credential. The token string is a bearer secret;
//! a user may hold any number of them at once.

use chrono::{DateTime, Utc};
use kernel::id::{RefreshTokenId, UserId};

#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: RefreshTokenId,
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Valid strictly before `expires_at`
    #[inline]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl NewRefreshToken {
    pub fn new(token: String, user_id: UserId, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            token,
            user_id,
            expires_at,
            created_at: now,
        }
    }

    pub fn into_refresh_token(self, id: RefreshTokenId) -> RefreshToken {
        RefreshToken {
            id,
            token: self.token,
            user_id: self.user_id,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}
