//! Repository traits and their PostgreSQL implementations.

pub mod refresh_token;
pub mod todo;
pub mod user;

pub use refresh_token::{PgRefreshTokenRepository, RefreshTokenRepository};
pub use todo::{PgTodoRepository, TodoRepository};
pub use user::{PgUserRepository, UserRepository};

use todohub_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning unique-constraint violations into conflicts.
pub(crate) fn map_write_error(e: sqlx::Error, context: &str, conflict: &str) -> AppError {
    let unique = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if unique {
        AppError::conflict(conflict)
    } else {
        AppError::with_source(ErrorKind::Infrastructure, context.to_string(), e)
    }
}
