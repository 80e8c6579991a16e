//! In-process repositories backed by [`dashmap`].
//!
//! They honour the same contracts as the PostgreSQL implementations,
//! including per-user atomicity of refresh-token writes, and are used by
//! the `memory` storage provider and by tests.

pub mod refresh_token;
pub mod todo;
pub mod user;

pub use refresh_token::MemoryRefreshTokenRepository;
pub use todo::MemoryTodoRepository;
pub use user::MemoryUserRepository;
