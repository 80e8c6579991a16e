//! Todo use cases with a per-principal read-through cache.
//!
//! Reads go through [`CacheCoordinator::read_through`]. Every mutation
//! invalidates the owner's cached responses before it runs and again after
//! it completes, so a read that raced the write cannot outlive the
//! response of the write.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use todohub_auth::AuthorizationGuard;
use todohub_cache::CacheCoordinator;
use todohub_core::error::AppError;
use todohub_core::result::AppResult;
use todohub_core::types::{PageRequest, PageSummary, TodoId};
use todohub_database::TodoRepository;
use todohub_entity::{Principal, Role, Todo};

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// One page of a principal's todos, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoPage {
    /// Items in this page.
    pub items: Vec<Todo>,
    /// Number of todos the principal owns.
    pub total: u64,
    /// Window that produced this page.
    pub page: PageRequest,
    /// Navigation metadata, present when a limit was requested.
    pub summary: Option<PageSummary>,
}

/// Handles todo operations.
#[derive(Debug, Clone)]
pub struct TodoService {
    todos: Arc<dyn TodoRepository>,
    cache: CacheCoordinator,
    guard: AuthorizationGuard,
}

impl TodoService {
    /// Creates a new todo service.
    pub fn new(todos: Arc<dyn TodoRepository>, cache: CacheCoordinator) -> Self {
        Self {
            todos,
            cache,
            guard: AuthorizationGuard::new(),
        }
    }

    /// Lists the principal's own todos. `route` is the canonical request
    /// route the result is cached under.
    pub async fn list(
        &self,
        principal: &Principal,
        route: &str,
        page: PageRequest,
    ) -> AppResult<TodoPage> {
        let owner = principal.id;
        self.cache
            .read_through(owner, route, || async move {
                let items = self.todos.find_by_owner(owner, &page).await?;
                let total = self.todos.count_by_owner(owner).await?;
                Ok(TodoPage {
                    items,
                    total,
                    page,
                    summary: page.summarize(total),
                })
            })
            .await
    }

    /// Fetches one todo. Someone else's todo and a missing todo are
    /// indistinguishable.
    pub async fn get(&self, principal: &Principal, id: &str, route: &str) -> AppResult<Todo> {
        let id = parse_todo_id(id)?;
        match principal.role {
            // Entries are invalidated per owner, so a read of another
            // owner's todo must not be cached under the reader.
            Role::Admin => self.load(principal, id).await,
            Role::User => {
                self.cache
                    .read_through(principal.id, route, || self.load(principal, id))
                    .await
            }
        }
    }

    /// Creates a todo owned by the principal.
    pub async fn create(&self, principal: &Principal, description: &str) -> AppResult<Todo> {
        let description = validate_description(description)?;
        let owner = principal.id;

        self.cache.invalidate_all(owner).await?;
        let todo = self.todos.create(owner, description).await?;
        self.cache.invalidate_all(owner).await?;

        info!(todo_id = %todo.id, user_id = %owner, "Todo created");
        Ok(todo)
    }

    /// Replaces the description of a todo. `body_id` must name the same
    /// todo as `path_id`.
    pub async fn update(
        &self,
        principal: &Principal,
        path_id: &str,
        body_id: &str,
        description: &str,
    ) -> AppResult<Todo> {
        if path_id != body_id {
            return Err(AppError::inconsistent_request(
                todohub_auth::guard::INCONSISTENT_REQUEST,
            ));
        }
        let description = validate_description(description)?;
        let existing = self.load(principal, parse_todo_id(path_id)?).await?;
        let owner = existing.owner_id;

        self.cache.invalidate_all(owner).await?;
        let updated = self
            .todos
            .update_description(existing.id, description)
            .await?;
        self.cache.invalidate_all(owner).await?;

        let updated = updated.ok_or_else(|| AppError::not_found("Not found."))?;
        info!(todo_id = %updated.id, user_id = %owner, by = %principal.id, "Todo updated");
        Ok(updated)
    }

    /// Deletes a todo.
    pub async fn delete(&self, principal: &Principal, id: &str) -> AppResult<()> {
        let existing = self.load(principal, parse_todo_id(id)?).await?;
        let owner = existing.owner_id;

        self.cache.invalidate_all(owner).await?;
        let removed = self.todos.delete(existing.id).await?;
        self.cache.invalidate_all(owner).await?;

        if !removed {
            return Err(AppError::not_found("Not found."));
        }
        info!(todo_id = %existing.id, user_id = %owner, by = %principal.id, "Todo deleted");
        Ok(())
    }

    async fn load(&self, principal: &Principal, id: TodoId) -> AppResult<Todo> {
        let todo = self
            .todos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Not found."))?;
        self.guard.require_access(principal, todo.owner_id)?;
        Ok(todo)
    }
}

fn parse_todo_id(raw: &str) -> AppResult<TodoId> {
    raw.parse()
        .map_err(|_| AppError::not_found("Not found."))
}

fn validate_description(description: &str) -> AppResult<&str> {
    let description = description.trim();
    if description.is_empty() {
        return Err(AppError::validation("Description must not be empty"));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(AppError::validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(description)
}
