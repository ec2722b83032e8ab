//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Generic expiring key-value store fronting the durable store.
///
/// Keys are opaque to implementations; callers own the namespacing. Failures
/// are returned to the caller as [`CacheError`] rather than being treated as
/// misses, so infrastructure outages surface instead of silently degrading.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::InMemoryCache`] - process-local cache for
///   tests and deployments without Redis
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on hit
    /// - `Ok(None)` on miss or expired entry
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key` without expiry.
    async fn set(&self, key: &str, value: &str) -> CacheResult<()>;

    /// Stores `value` under `key`, expiring after `ttl_seconds`.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Atomically increments the integer stored under `key` and returns the new value.
    ///
    /// A missing key counts as zero, so the first call returns `1`.
    async fn incr(&self, key: &str) -> CacheResult<u64>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
