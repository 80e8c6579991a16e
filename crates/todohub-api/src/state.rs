//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use todohub_auth::{SessionManager, TokenService};
use todohub_cache::CacheCoordinator;
use todohub_core::config::AppConfig;
use todohub_database::Repositories;
use todohub_service::{TodoService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Every field is
/// cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Storage backend
    pub repositories: Repositories,
    /// Per-principal response cache
    pub cache: CacheCoordinator,

    // ── Auth ─────────────────────────────────────────────────
    /// Access/refresh token signing and verification
    pub tokens: TokenService,
    /// Register, login, refresh, and logout flows
    pub sessions: SessionManager,

    // ── Services ─────────────────────────────────────────────
    /// Account operations
    pub user_service: Arc<UserService>,
    /// Todo operations
    pub todo_service: Arc<TodoService>,
}
