//! Todo repository.

use async_trait::async_trait;
use sqlx::PgPool;

use todohub_core::error::{AppError, ErrorKind};
use todohub_core::result::AppResult;
use todohub_core::types::{PageRequest, TodoId, UserId};
use todohub_entity::Todo;

/// Todo storage, scoped by owner.
#[async_trait]
pub trait TodoRepository: Send + Sync + std::fmt::Debug + 'static {
    /// List an owner's todos, newest first, within the requested window.
    async fn find_by_owner(&self, owner: UserId, page: &PageRequest) -> AppResult<Vec<Todo>>;

    /// Count an owner's todos.
    async fn count_by_owner(&self, owner: UserId) -> AppResult<u64>;

    /// Find a todo by primary key.
    async fn find_by_id(&self, id: TodoId) -> AppResult<Option<Todo>>;

    /// Insert a todo for `owner`.
    async fn create(&self, owner: UserId, description: &str) -> AppResult<Todo>;

    /// Replace the description. Returns `None` when the todo does not exist.
    async fn update_description(&self, id: TodoId, description: &str) -> AppResult<Option<Todo>>;

    /// Delete a todo. Returns whether it existed.
    async fn delete(&self, id: TodoId) -> AppResult<bool>;

    /// Delete every todo of `owner`. Returns the number removed.
    async fn delete_by_owner(&self, owner: UserId) -> AppResult<u64>;
}

/// PostgreSQL-backed [`TodoRepository`].
#[derive(Debug, Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    /// Create a new todo repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn find_by_owner(&self, owner: UserId, page: &PageRequest) -> AppResult<Vec<Todo>> {
        // LIMIT NULL means no limit in PostgreSQL.
        sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE owner_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(owner)
        .bind(page.limit.map(|l| l as i64))
        .bind(page.offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Infrastructure, "Failed to list todos", e))
    }

    async fn count_by_owner(&self, owner: UserId) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos WHERE owner_id = $1")
            .bind(owner)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to count todos", e)
            })?;
        Ok(total as u64)
    }

    async fn find_by_id(&self, id: TodoId) -> AppResult<Option<Todo>> {
        sqlx::query_as::<_, Todo>("SELECT * FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Infrastructure, "Failed to find todo", e))
    }

    async fn create(&self, owner: UserId, description: &str) -> AppResult<Todo> {
        sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (id, owner_id, description) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(TodoId::new())
        .bind(owner)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Infrastructure, "Failed to create todo", e))
    }

    async fn update_description(&self, id: TodoId, description: &str) -> AppResult<Option<Todo>> {
        sqlx::query_as::<_, Todo>("UPDATE todos SET description = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(description)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to update todo", e)
            })
    }

    async fn delete(&self, id: TodoId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to delete todo", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_owner(&self, owner: UserId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM todos WHERE owner_id = $1")
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to delete todos", e)
            })?;
        Ok(result.rows_affected())
    }
}
