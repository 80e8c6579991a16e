//! Application builder: wires state, router, and middleware into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::trace::TraceLayer;

use todohub_auth::{PasswordHasher, PasswordValidator, SessionManager, SessionStore, TokenService};
use todohub_cache::{CacheCoordinator, CacheManager};
use todohub_core::config::AppConfig;
use todohub_database::Repositories;
use todohub_service::{TodoService, UserService};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(build_compression_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Wires the auth core, the cache coordinator, and the services over an
/// opened storage backend and cache.
pub fn build_state(config: AppConfig, repositories: Repositories, cache: CacheManager) -> AppState {
    let cache = CacheCoordinator::new(
        cache,
        Duration::from_millis(config.cache.call_timeout_ms),
    );

    let tokens = TokenService::new(&config.auth);
    let hasher = PasswordHasher::new();
    let validator = PasswordValidator::new(&config.auth);
    let session_store = SessionStore::new(
        Arc::clone(&repositories.refresh_tokens),
        Duration::from_millis(config.auth.store_timeout_ms),
    );
    let sessions = SessionManager::new(
        tokens.clone(),
        session_store,
        Arc::clone(&repositories.users),
        hasher.clone(),
        validator.clone(),
    );

    let user_service = Arc::new(UserService::new(
        Arc::clone(&repositories.users),
        Arc::clone(&repositories.todos),
        sessions.clone(),
        cache.clone(),
        hasher,
        validator,
    ));
    let todo_service = Arc::new(TodoService::new(
        Arc::clone(&repositories.todos),
        cache.clone(),
    ));

    AppState {
        config: Arc::new(config),
        repositories,
        cache,
        tokens,
        sessions,
        user_service,
        todo_service,
    }
}
