//! User repository.

use async_trait::async_trait;
use sqlx::PgPool;

use todohub_core::error::{AppError, ErrorKind};
use todohub_core::result::AppResult;
use todohub_core::types::UserId;
use todohub_entity::user::{CreateUser, UpdateUser, User};

use super::map_write_error;

/// Account storage.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by exact login name.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<User>>;

    /// List every user, oldest first.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Insert a user. A taken name is a conflict.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Apply the given changes. Returns `None` when the user does not exist.
    async fn update(&self, id: UserId, data: UpdateUser) -> AppResult<Option<User>>;

    /// Delete a user together with everything it owns.
    /// Returns whether the user existed.
    async fn delete(&self, id: UserId) -> AppResult<bool>;
}

/// PostgreSQL-backed [`UserRepository`].
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to find user by id", e)
            })
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to find user by name", e)
            })
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Infrastructure, "Failed to list users", e))
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(UserId::new())
        .bind(&data.name)
        .bind(&data.password_hash)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                "Failed to create user",
                &format!("Name '{}' is already taken", data.name),
            )
        })
    }

    async fn update(&self, id: UserId, data: UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = COALESCE($2, name), \
             password_hash = COALESCE($3, password_hash) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.name.as_deref())
        .bind(data.password_hash.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update user", "Name is already taken"))
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Infrastructure, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to delete user tokens", e)
            })?;

        sqlx::query("DELETE FROM todos WHERE owner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to delete user todos", e)
            })?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to delete user", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Infrastructure, "Failed to commit user deletion", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
