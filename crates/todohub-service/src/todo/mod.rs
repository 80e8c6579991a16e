//! Owner-scoped todo items.

pub mod service;

pub use service::{TodoPage, TodoService};
