//! Process-wide storage handle.

use std::sync::Arc;

use tracing::info;

use todohub_core::config::DatabaseConfig;
use todohub_core::error::AppError;
use todohub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryRefreshTokenRepository, MemoryTodoRepository, MemoryUserRepository};
use crate::migration::run_migrations;
use crate::repositories::{
    PgRefreshTokenRepository, PgTodoRepository, PgUserRepository, RefreshTokenRepository,
    TodoRepository, UserRepository,
};

/// The repositories of the selected storage backend.
///
/// Opened once at startup with [`Repositories::connect`], shared through
/// `Arc`s, and released with [`Repositories::close`] on shutdown.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Account storage.
    pub users: Arc<dyn UserRepository>,
    /// Refresh-credential storage.
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    /// Todo storage.
    pub todos: Arc<dyn TodoRepository>,
    pool: Option<DatabasePool>,
}

impl Repositories {
    /// Open the backend named by `config.provider`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            "memory" => {
                info!("Using in-memory storage; data is lost on restart");
                Ok(Self::in_memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'"
            ))),
        }
    }

    /// Repositories over an open PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(PgUserRepository::new(pg.clone())),
            refresh_tokens: Arc::new(PgRefreshTokenRepository::new(pg.clone())),
            todos: Arc::new(PgTodoRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Fresh, empty in-process repositories.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserRepository::new()),
            refresh_tokens: Arc::new(MemoryRefreshTokenRepository::new()),
            todos: Arc::new(MemoryTodoRepository::new()),
            pool: None,
        }
    }

    /// Check that the backend is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
