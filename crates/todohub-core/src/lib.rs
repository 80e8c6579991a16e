//! # todohub-core
//!
//! Core crate for TodoHub. Contains the unified error system, configuration
//! schemas, typed identifiers, pagination types, the cache provider trait,
//! and the time-budget helper used around every external call.
//!
//! This crate has **no** internal dependencies on other TodoHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod timeout;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
