//! SessionStore: the single active refresh credential per principal.

use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tracing::debug;

use todohub_core::result::AppResult;
use todohub_core::timeout::bounded;
use todohub_core::types::UserId;
use todohub_database::RefreshTokenRepository;
use todohub_entity::SessionRecord;

/// Hex-encoded SHA-256 of a refresh token. Raw tokens are never stored.
pub fn token_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Persists refresh credentials, one row per principal.
///
/// Every call is bounded by the configured time budget; an elapsed budget
/// is an infrastructure failure.
#[derive(Debug, Clone)]
pub struct SessionStore {
    repo: Arc<dyn RefreshTokenRepository>,
    budget: Duration,
}

impl SessionStore {
    /// Create a store over `repo`.
    pub fn new(repo: Arc<dyn RefreshTokenRepository>, budget: Duration) -> Self {
        Self { repo, budget }
    }

    /// Make `token` the only active refresh credential of `principal`.
    pub async fn put(&self, principal: UserId, token: &str) -> AppResult<SessionRecord> {
        let digest = token_digest(token);
        let record = bounded(
            self.budget,
            "session.put",
            self.repo.upsert(principal, &digest),
        )
        .await?;
        debug!(user_id = %principal, "Stored refresh credential");
        Ok(record)
    }

    /// Find the row holding `token`, if it is the active credential.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<SessionRecord>> {
        let digest = token_digest(token);
        bounded(
            self.budget,
            "session.find",
            self.repo.find_by_token_hash(&digest),
        )
        .await
    }

    /// Remove the row holding `token`. Returns whether a row was removed.
    pub async fn revoke_by_token(&self, token: &str) -> AppResult<bool> {
        let digest = token_digest(token);
        bounded(
            self.budget,
            "session.revoke",
            self.repo.delete_by_token_hash(&digest),
        )
        .await
    }

    /// Remove the row of `principal`. Returns whether a row was removed.
    pub async fn revoke_by_principal(&self, principal: UserId) -> AppResult<bool> {
        let removed = bounded(
            self.budget,
            "session.revoke_principal",
            self.repo.delete_by_user(principal),
        )
        .await?;
        debug!(user_id = %principal, removed, "Revoked refresh credential");
        Ok(removed)
    }
}
