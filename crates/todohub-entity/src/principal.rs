//! The authenticated identity derived from a verified credential.

use serde::{Deserialize, Serialize};
use todohub_core::types::UserId;

use crate::user::Role;

/// Identity and role of the caller.
///
/// A principal is a snapshot: once embedded in a token it is not updated.
/// It is re-read from storage whenever a new access token is minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// The user this principal acts for.
    pub id: UserId,
    /// Name shown to other parties.
    pub display_name: String,
    /// Role at the time the snapshot was taken.
    pub role: Role,
}

impl Principal {
    /// Create a principal snapshot.
    pub fn new(id: UserId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role,
        }
    }

    /// Check if this principal holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
