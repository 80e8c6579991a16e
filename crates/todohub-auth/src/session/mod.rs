//! Refresh-credential persistence and session flows.

pub mod manager;
pub mod store;

pub use manager::{IssuedCredentials, RefreshedAccess, SessionManager};
pub use store::SessionStore;
