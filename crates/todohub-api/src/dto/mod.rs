//! Request and response documents.

pub mod request;
pub mod response;
