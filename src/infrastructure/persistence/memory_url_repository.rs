//! In-memory implementation of the url repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::UrlRepository;
use crate::error::RepositoryError;

/// Process-local url store with the same uniqueness contract as PostgreSQL.
///
/// The check-and-insert on a short code happens under the DashMap shard lock
/// for that key, so two concurrent inserts of the same code cannot both
/// succeed. Ids come from an atomic sequence and are never reused.
#[derive(Debug)]
pub struct InMemoryUrlRepository {
    by_code: DashMap<String, UrlMapping>,
    next_id: AtomicI64,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            by_code: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of committed mappings.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Returns true if nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Snapshot of every committed mapping, ordered by id.
    pub fn mappings(&self) -> Vec<UrlMapping> {
        let mut all: Vec<UrlMapping> = self.by_code.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|m| m.id);
        all
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(
        &self,
        short_code: &str,
        long_url: &str,
    ) -> Result<UrlMapping, RepositoryError> {
        match self.by_code.entry(short_code.to_string()) {
            Entry::Occupied(_) => Err(RepositoryError::DuplicateCode(short_code.to_string())),
            Entry::Vacant(vacant) => {
                let mapping = UrlMapping::new(
                    self.next_id.fetch_add(1, Ordering::SeqCst),
                    short_code.to_string(),
                    long_url.to_string(),
                    Utc::now(),
                );
                vacant.insert(mapping.clone());
                Ok(mapping)
            }
        }
    }

    async fn find_long_url_by_code(
        &self,
        short_code: &str,
    ) -> Result<Option<String>, RepositoryError> {
        Ok(self.by_code.get(short_code).map(|m| m.long_url.clone()))
    }

    async fn find_code_by_long_url(
        &self,
        long_url: &str,
    ) -> Result<Option<String>, RepositoryError> {
        Ok(self
            .by_code
            .iter()
            .filter(|m| m.long_url == long_url)
            .min_by_key(|m| m.id)
            .map(|m| m.short_code.clone()))
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
    async fn test_create_and_find() {
        let repo = InMemoryUrlRepository::new();

        let mapping = repo
            .create("abc123", "https://example.com")
            .await
            .unwrap();

        assert_eq!(mapping.id, 1);
        assert_eq!(mapping.short_code, "abc123");
        assert_eq!(
            repo.find_long_url_by_code("abc123").await.unwrap().as_deref(),
            Some("https://example.com")
        );
        assert_eq!(
            repo.find_code_by_long_url("https://example.com")
                .await
                .unwrap()
                .as_deref(),
            Some("abc123")
        );
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repo = InMemoryUrlRepository::new();

        assert!(repo.find_long_url_by_code("nope").await.unwrap().is_none());
        assert!(
            repo.find_code_by_long_url("https://nowhere.example")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let repo = InMemoryUrlRepository::new();

        repo.create("abc123", "https://example.com").await.unwrap();
        let err = repo
            .create("abc123", "https://other.com")
            .await
            .unwrap_err();

        assert_eq!(err, RepositoryError::DuplicateCode("abc123".to_string()));
        assert_eq!(repo.len(), 1);
        assert_eq!(
            repo.find_long_url_by_code("abc123").await.unwrap().as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn test_duplicate_long_url_allowed_lowest_id_wins() {
        let repo = InMemoryUrlRepository::new();

        repo.create("first", "https://example.com").await.unwrap();
        repo.create("second", "https://example.com").await.unwrap();

        assert_eq!(
            repo.find_code_by_long_url("https://example.com")
                .await
                .unwrap()
                .as_deref(),
            Some("first")
        );
    }

    #[tokio::test]
    async fn test_ids_increase() {
        let repo = InMemoryUrlRepository::new();

        let a = repo.create("a", "https://a.example").await.unwrap();
        let b = repo.create("b", "https://b.example").await.unwrap();
        let _ = repo.create("a", "https://c.example").await;
        let c = repo.create("c", "https://c.example").await.unwrap();

        assert!(a.id < b.id && b.id < c.id);
        let ids: Vec<i64> = repo.mappings().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[tokio::test]
    async fn test_concurrent_same_code_single_winner() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        let mut handles = Vec::new();

        for i in 0..20 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.create("contended", &format!("https://example{i}.com"))
                    .await
                    .is_ok()
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repo.len(), 1);
    }
}
