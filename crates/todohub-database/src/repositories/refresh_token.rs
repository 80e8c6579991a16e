//! Refresh-credential rows, one per user.

use async_trait::async_trait;
use sqlx::PgPool;

use todohub_core::error::{AppError, ErrorKind};
use todohub_core::result::AppResult;
use todohub_core::types::{SessionId, UserId};
use todohub_entity::SessionRecord;

/// Storage contract for refresh credentials.
///
/// Rows are unique on `user_id`. Each operation touches one row and is
/// atomic with respect to it.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert or replace the credential of `user_id`.
    async fn upsert(&self, user_id: UserId, token_hash: &str) -> AppResult<SessionRecord>;

    /// Find the row holding `token_hash`.
    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<SessionRecord>>;

    /// Delete the row holding `token_hash`. Returns whether a row was removed.
    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<bool>;

    /// Delete the row of `user_id`. Returns whether a row was removed.
    async fn delete_by_user(&self, user_id: UserId) -> AppResult<bool>;
}

/// PostgreSQL-backed [`RefreshTokenRepository`].
#[derive(Debug, Clone)]
pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    /// Create a new refresh-token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    async fn upsert(&self, user_id: UserId, token_hash: &str) -> AppResult<SessionRecord> {
        sqlx::query_as::<_, SessionRecord>(
            "INSERT INTO refresh_tokens (id, user_id, token_hash) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO UPDATE \
             SET token_hash = EXCLUDED.token_hash, created_at = NOW() \
             RETURNING *",
        )
        .bind(SessionId::new())
        .bind(user_id)
        .bind(token_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Infrastructure, "Failed to store refresh token", e)
        })
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<SessionRecord>> {
        sqlx::query_as::<_, SessionRecord>("SELECT * FROM refresh_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to find refresh token", e)
            })
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to delete refresh token", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user(&self, user_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to revoke user tokens", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
