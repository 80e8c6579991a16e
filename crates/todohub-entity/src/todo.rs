//! Todo entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todohub_core::types::{TodoId, UserId};

/// A todo item owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Unique todo identifier.
    pub id: TodoId,
    /// Owner of the item.
    pub owner_id: UserId,
    /// Free-form text.
    pub description: String,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}
