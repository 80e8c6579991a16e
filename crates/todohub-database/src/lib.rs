//! # todohub-database
//!
//! Storage for TodoHub. Each entity is reached through a repository trait
//! with two implementations: PostgreSQL (sqlx) for deployments and an
//! in-process map for development and tests. [`Repositories`] owns the
//! selected backend for the lifetime of the process.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::{RefreshTokenRepository, TodoRepository, UserRepository};
pub use store::Repositories;
