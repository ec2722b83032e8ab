//! Repository trait for the durable short code store.

use crate::domain::entities::UrlMapping;
use crate::error::RepositoryError;
use async_trait::async_trait;

/// Durable, authoritative store of url mappings.
///
/// The store enforces short code uniqueness; it is the only place where that
/// invariant is checked. Long URLs are not unique at this layer.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Commits a new mapping.
    ///
    /// A failed insert leaves no partial state behind, so the caller can retry
    /// with a fresh candidate.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateCode`] if `short_code` is already taken.
    /// Returns [`RepositoryError::Unavailable`] on any other storage failure.
    async fn create(&self, short_code: &str, long_url: &str)
    -> Result<UrlMapping, RepositoryError>;

    /// Looks up the long URL for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Unavailable`] on storage failures.
    async fn find_long_url_by_code(
        &self,
        short_code: &str,
    ) -> Result<Option<String>, RepositoryError>;

    /// Looks up a short code already assigned to `long_url`.
    ///
    /// When several mappings share the URL, the one with the lowest id wins.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Unavailable`] on storage failures.
    async fn find_code_by_long_url(
        &self,
        long_url: &str,
    ) -> Result<Option<String>, RepositoryError>;

    /// Checks if the store is reachable.
    async fn health_check(&self) -> bool;
}
