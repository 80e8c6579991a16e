//! # todohub-service
//!
//! Business logic for TodoHub. Services receive the authenticated
//! [`todohub_entity::Principal`] and compose the authorization guard, the
//! session manager, and the response cache around repository calls.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time.

pub mod todo;
pub mod user;

pub use todo::{TodoPage, TodoService};
pub use user::{UpdateAccount, UserService};
