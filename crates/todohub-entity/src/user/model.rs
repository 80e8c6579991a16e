//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todohub_core::types::UserId;

use super::role::Role;
use crate::principal::Principal;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name, also used as the display name.
    pub name: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account role.
    pub role: Role,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The identity snapshot embedded in credentials for this user.
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.name.clone(), self.role)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Desired login name.
    pub name: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: Role,
}

/// Fields an owner may change on their account.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    /// New login name.
    pub name: Option<String>,
    /// New pre-hashed password.
    pub password_hash: Option<String>,
}
