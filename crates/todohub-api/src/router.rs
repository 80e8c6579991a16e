//! Route definitions for the TodoHub HTTP API.
//!
//! Routes are mounted at the root, grouped by resource. The router receives
//! `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::timeout::TimeoutLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and per-request middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .merge(user_routes())
        .merge(todo_routes())
        .route("/health", get(handlers::health::health))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(axum_middleware::from_fn(
            middleware::media_type::require_json_api,
        ))
        .layer(axum_middleware::from_fn(
            middleware::error_pointer::fill_error_pointer,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Accounts and credentials
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::register),
        )
        .route("/users/login", post(handlers::users::login))
        .route("/users/token", post(handlers::users::refresh_token))
        .route(
            "/users/logout",
            axum::routing::delete(handlers::users::logout),
        )
        .route(
            "/users/{id}",
            get(handlers::users::get_user)
                .patch(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
}

/// Owner-scoped todos
fn todo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/todos",
            get(handlers::todos::list_todos).post(handlers::todos::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::todos::get_todo)
                .put(handlers::todos::update_todo)
                .delete(handlers::todos::delete_todo),
        )
}
