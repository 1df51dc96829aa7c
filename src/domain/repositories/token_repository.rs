//! Bearer tokens that identify the owner of created links.
//!
//! A token belongs to exactly one user. Its name is a label chosen by the
//! operator and is unique per user, so `(user_id, name)` addresses a token;
//! the bare name does not. Only the HMAC of the raw token is stored.

use crate::domain::entities::OwnerId;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A stored token row.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl ApiToken {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// The owner that requests carrying this token act as.
    pub fn owner(&self) -> OwnerId {
        OwnerId::new(self.user_id)
    }
}

/// Token storage used by bearer authentication and the admin CLI.
///
/// Storage failures surface as [`AppError::Internal`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Owner of an active token with this hash. Revoked tokens resolve to `None`.
    async fn find_owner(&self, token_hash: &str) -> Result<Option<OwnerId>, AppError>;

    /// Stamps `last_used_at` on an active token. Unknown hashes are ignored.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Issues a token to `user_id`.
    ///
    /// Fails with [`AppError::Conflict`] when the hash is already stored or
    /// the user already has a token called `name`.
    async fn create_token(
        &self,
        user_id: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError>;

    /// Every token, revoked ones included, in id order.
    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError>;

    /// The token `user_id` issued under `name`.
    async fn find_by_name(&self, user_id: i64, name: &str)
    -> Result<Option<ApiToken>, AppError>;

    /// Marks a token revoked.
    ///
    /// [`AppError::NotFound`] if no active token has this id.
    async fn revoke_token(&self, id: i64) -> Result<(), AppError>;
}
