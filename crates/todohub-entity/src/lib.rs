//! # todohub-entity
//!
//! Domain entity models for TodoHub. Database entities derive
//! `sqlx::FromRow`; [`Principal`] is the value object carried inside
//! credentials.

pub mod principal;
pub mod session;
pub mod todo;
pub mod user;

pub use principal::Principal;
pub use session::SessionRecord;
pub use todo::Todo;
pub use user::{Role, User};
