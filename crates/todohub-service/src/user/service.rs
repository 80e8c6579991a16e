//! Account operations: lookup, listing, self-service updates, and
//! administrative deletion.

use std::sync::Arc;

use tracing::info;

use todohub_auth::password::{PasswordHasher, PasswordValidator};
use todohub_auth::{AuthorizationGuard, SessionManager};
use todohub_cache::CacheCoordinator;
use todohub_core::error::AppError;
use todohub_core::result::AppResult;
use todohub_core::types::UserId;
use todohub_database::{TodoRepository, UserRepository};
use todohub_entity::user::{UpdateUser, User};
use todohub_entity::{Principal, Role};

/// Detail of a rejected current password.
pub const WRONG_OLD_PASSWORD: &str = "You have typed in wrong old password!";

/// Changes requested on `PATCH /users/:id`.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccount {
    /// Identifier carried in the request body.
    pub id: String,
    /// Current password, always required.
    pub old_password: String,
    /// Desired login name.
    pub new_name: Option<String>,
    /// Desired password.
    pub new_password: Option<String>,
}

/// Handles account operations.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    todos: Arc<dyn TodoRepository>,
    sessions: SessionManager,
    cache: CacheCoordinator,
    guard: AuthorizationGuard,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        todos: Arc<dyn TodoRepository>,
        sessions: SessionManager,
        cache: CacheCoordinator,
        hasher: PasswordHasher,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            users,
            todos,
            sessions,
            cache,
            guard: AuthorizationGuard::new(),
            hasher,
            validator,
        }
    }

    /// Lists every account. Admin only.
    pub async fn list(&self, principal: &Principal) -> AppResult<Vec<User>> {
        self.guard.require_role(principal, &[Role::Admin])?;
        self.users.find_all().await
    }

    /// Fetches one account.
    ///
    /// Someone else's account and a missing account are indistinguishable.
    pub async fn get(&self, principal: &Principal, id: &str) -> AppResult<User> {
        let id = parse_user_id(id)?;
        self.guard.require_access(principal, id)?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Not found."))
    }

    /// Renames the account or changes its password.
    ///
    /// The new name shows up in credentials minted by the next refresh.
    pub async fn update(
        &self,
        principal: &Principal,
        path_id: &str,
        request: UpdateAccount,
    ) -> AppResult<User> {
        self.guard
            .require_consistent(path_id, &request.id, principal)?;

        let new_name = request
            .new_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        let new_password = request.new_password.as_deref().filter(|p| !p.is_empty());
        if new_name.is_none() && new_password.is_none() {
            return Err(AppError::validation(
                "Either newName or newPassword must be provided",
            ));
        }

        let id = parse_user_id(path_id)?;
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Not found."))?;

        if !self
            .hasher
            .verify_password(&request.old_password, &user.password_hash)?
        {
            return Err(AppError::forbidden(WRONG_OLD_PASSWORD));
        }

        let password_hash = match new_password {
            Some(password) => {
                let name = new_name.unwrap_or(user.name.as_str());
                self.validator.validate(password, &[name])?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };

        let updated = self
            .users
            .update(
                id,
                UpdateUser {
                    name: new_name.map(str::to_string),
                    password_hash,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("Not found."))?;

        info!(
            user_id = %id,
            renamed = new_name.is_some(),
            password_changed = new_password.is_some(),
            "Account updated"
        );
        Ok(updated)
    }

    /// Deletes an account with its refresh credential, todos, and cached
    /// responses. Admin only.
    pub async fn delete(&self, principal: &Principal, id: &str) -> AppResult<()> {
        self.guard.require_role(principal, &[Role::Admin])?;
        let id = parse_user_id(id)?;

        self.cache.invalidate_all(id).await?;
        self.sessions.revoke_principal(id).await?;
        let todos = self.todos.delete_by_owner(id).await?;
        let existed = self.users.delete(id).await?;
        self.cache.invalidate_all(id).await?;

        if !existed {
            return Err(AppError::not_found("Not found."));
        }
        info!(user_id = %id, todos, by = %principal.id, "Account deleted");
        Ok(())
    }
}

/// Unparsable identifiers name nothing.
fn parse_user_id(raw: &str) -> AppResult<UserId> {
    raw.parse()
        .map_err(|_| AppError::not_found("Not found."))
}
