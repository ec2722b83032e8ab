//! Cache tier fronting the durable store.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`InMemoryCache`] - Process-local cache with the same expiry and counter semantics

mod memory_cache;
mod redis_cache;
mod service;

pub use memory_cache::InMemoryCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
