//! Custom Axum extractors.

pub mod auth;
pub mod cookie;
pub mod json;
pub mod pagination;

pub use auth::AuthUser;
pub use cookie::RefreshCookie;
pub use json::ValidatedJson;
pub use pagination::PageParams;
