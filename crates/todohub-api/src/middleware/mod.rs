//! Axum middleware stack.

pub mod compression;
pub mod cors;
pub mod error_pointer;
pub mod logging;
pub mod media_type;
