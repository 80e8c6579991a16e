//! # todohub-cache
//!
//! Response caching for TodoHub. Two providers implement
//! [`todohub_core::traits::CacheProvider`]:
//!
//! - **memory**: In-process cache using [moka](https://crates.io/crates/moka)
//! - **redis**: Redis-backed cache using the [redis](https://crates.io/crates/redis) crate
//!
//! [`CacheCoordinator`] sits on top and keeps per-principal cached
//! responses coherent with mutations.

pub mod coordinator;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use coordinator::{CacheCoordinator, CachedResponse};
pub use provider::CacheManager;
