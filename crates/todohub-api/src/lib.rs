//! # todohub-api
//!
//! HTTP API layer for TodoHub built on Axum.
//!
//! Serves JSON:API-style documents for accounts, credentials, and todos.
//! Provides the router, middleware (request logging, CORS, media type
//! negotiation, error pointer),
//! extractors, DTOs, and the mapping from [`todohub_core::AppError`] to
//! JSON:API error documents.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use error::ApiError;
pub use state::AppState;
