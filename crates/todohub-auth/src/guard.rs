//! AuthorizationGuard: role, ownership, and request-consistency checks.
//!
//! Each check comes as a predicate and as a `require_*` variant returning
//! the matching error kind. Role handling is an exhaustive match so a new
//! role cannot slip through any decision unnoticed.

use todohub_core::error::AppError;
use todohub_core::types::UserId;
use todohub_entity::{Principal, Role};

/// Detail of a failed role check.
pub const NO_ACCESS_RIGHTS: &str = "You do not have access rights to the content!";
/// Detail of a failed ownership check, identical to a missing resource.
pub const NOT_FOUND: &str = "Not found.";
/// Detail of a path/body identifier mismatch.
pub const INCONSISTENT_REQUEST: &str = "Request identifiers do not match!";

/// Stateless authorization decisions for an authenticated principal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGuard;

impl AuthorizationGuard {
    /// Creates a new guard.
    pub fn new() -> Self {
        Self
    }

    /// Whether the principal holds one of `allowed`.
    pub fn has_role(&self, principal: &Principal, allowed: &[Role]) -> bool {
        allowed.contains(&principal.role)
    }

    /// Whether the principal may act on a resource owned by `owner`.
    pub fn can_access(&self, principal: &Principal, owner: UserId) -> bool {
        match principal.role {
            Role::Admin => true,
            Role::User => principal.id == owner,
        }
    }

    /// Whether a mutation addressed to `path_id` with payload id `body_id`
    /// is coherent for this principal.
    ///
    /// The identifiers must always agree; the admin role only lifts the
    /// requirement that they name the principal itself.
    pub fn is_consistent_mutation(
        &self,
        path_id: &str,
        body_id: &str,
        principal: &Principal,
    ) -> bool {
        if path_id != body_id {
            return false;
        }
        match principal.role {
            Role::Admin => true,
            Role::User => path_id == principal.id.to_string(),
        }
    }

    /// Fails with an insufficient-role error unless the principal holds one
    /// of `allowed`.
    pub fn require_role(&self, principal: &Principal, allowed: &[Role]) -> Result<(), AppError> {
        if self.has_role(principal, allowed) {
            Ok(())
        } else {
            Err(AppError::insufficient_role(NO_ACCESS_RIGHTS))
        }
    }

    /// Fails with an ownership violation that reads exactly like a missing
    /// resource.
    pub fn require_access(&self, principal: &Principal, owner: UserId) -> Result<(), AppError> {
        if self.can_access(principal, owner) {
            Ok(())
        } else {
            Err(AppError::ownership_violation(NOT_FOUND))
        }
    }

    /// Fails with an inconsistent-request error when
    /// [`Self::is_consistent_mutation`] rejects the identifiers.
    pub fn require_consistent(
        &self,
        path_id: &str,
        body_id: &str,
        principal: &Principal,
    ) -> Result<(), AppError> {
        if self.is_consistent_mutation(path_id, body_id, principal) {
            Ok(())
        } else {
            Err(AppError::inconsistent_request(INCONSISTENT_REQUEST))
        }
    }
}
