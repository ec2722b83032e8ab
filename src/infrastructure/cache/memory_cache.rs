//! Process-local cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry as MapEntry;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// In-memory cache with per-entry expiry and an atomic counter.
///
/// Backed by [`DashMap`], so concurrent requests touching different keys do not
/// contend on a single lock. `incr` holds the shard lock for the key while it
/// reads and writes, which makes it atomic with respect to other callers.
///
/// Used when `REDIS_URL` is not configured and as the cache in tests. State is
/// lost on restart. Projections are rebuilt from the durable store on the next
/// miss; the sequential counter is not, so sequential mode needs Redis in
/// production.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: DashMap<String, Entry>,
}

impl InMemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        debug!("Using in-memory cache");
        Self::default()
    }

    /// Number of live (non-expired) entries.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_expired()).count()
    }

    /// Returns true if there are no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry, including counters.
    pub fn clear(&self) {
        self.entries.clear();
    }

    fn insert(&self, key: &str, value: &str, ttl: Option<Duration>) {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: ttl.map(|ttl| Instant::now() + ttl),
            },
        );
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let Some(entry) = self.entries.get(key) else {
            return Ok(None);
        };

        if entry.is_expired() {
            drop(entry);
            self.entries.remove_if(key, |_, e| e.is_expired());
            return Ok(None);
        }

        Ok(Some(entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        self.insert(key, value, None);
        Ok(())
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        self.insert(key, value, Some(Duration::from_secs(ttl_seconds)));
        Ok(())
    }

    async fn incr(&self, key: &str) -> CacheResult<u64> {
        match self.entries.entry(key.to_string()) {
            MapEntry::Occupied(mut occupied) => {
                let current = if occupied.get().is_expired() {
                    0
                } else {
                    occupied.get().value.parse::<u64>().map_err(|_| {
                        CacheError::OperationError(format!(
                            "value at {} is not an integer",
                            key
                        ))
                    })?
                };
                let next = current + 1;
                occupied.insert(Entry {
                    value: next.to_string(),
                    expires_at: None,
                });
                Ok(next)
            }
            MapEntry::Vacant(vacant) => {
                vacant.insert(Entry {
                    value: "1".to_string(),
                    expires_at: None,
                });
                Ok(1)
            }
        }
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new();

        cache.set("url:abc", "https://example.com").await.unwrap();

        let value = cache.get("url:abc").await.unwrap();
        assert_eq!(value.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = InMemoryCache::new();
        assert!(cache.get("url:nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_zero_ttl_expires_immediately() {
        let cache = InMemoryCache::new();

        cache
            .set_with_ttl("url:abc", "https://example.com", 0)
            .await
            .unwrap();

        assert!(cache.get("url:abc").await.unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_ttl_entry_alive_before_expiry() {
        let cache = InMemoryCache::new();

        cache
            .set_with_ttl("url:abc", "https://example.com", 3600)
            .await
            .unwrap();

        assert!(cache.get("url:abc").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = InMemoryCache::new();

        cache.set("url:abc", "https://example.com").await.unwrap();
        cache.delete("url:abc").await.unwrap();
        cache.delete("url:abc").await.unwrap();

        assert!(cache.get("url:abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_incr_starts_at_one() {
        let cache = InMemoryCache::new();

        assert_eq!(cache.incr("counter").await.unwrap(), 1);
        assert_eq!(cache.incr("counter").await.unwrap(), 2);
        assert_eq!(cache.get("counter").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_incr_non_integer_fails() {
        let cache = InMemoryCache::new();

        cache.set("counter", "abc").await.unwrap();

        let err = cache.incr("counter").await.unwrap_err();
        assert!(matches!(err, CacheError::OperationError(_)));
    }

    #[tokio::test]
    async fn test_concurrent_incr_is_atomic() {
        let cache = Arc::new(InMemoryCache::new());
        let mut handles = Vec::new();

        for _ in 0..50 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                cache.incr("counter").await.unwrap()
            }));
        }

        let mut values = Vec::new();
        for handle in handles {
            values.push(handle.await.unwrap());
        }
        values.sort_unstable();

        assert_eq!(values, (1..=50).collect::<Vec<u64>>());
    }
}
