//! Persisted refresh-credential row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todohub_core::types::{SessionId, UserId};

/// The single active refresh credential of a user.
///
/// Only the SHA-256 digest of the token is stored. The table is unique on
/// `user_id`, so writing a new row replaces the previous credential.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionRecord {
    /// Row identifier.
    pub id: SessionId,
    /// The principal owning this credential.
    pub user_id: UserId,
    /// Hex-encoded SHA-256 digest of the refresh token.
    pub token_hash: String,
    /// When the credential was written.
    pub created_at: DateTime<Utc>,
}
