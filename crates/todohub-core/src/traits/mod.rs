//! Core traits defined in `todohub-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
