//! PostgreSQL implementation of the url repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::UrlRepository;
use crate::error::RepositoryError;

/// PostgreSQL repository for url mappings.
///
/// Every operation is a single statement on the pooled connection, so a failed
/// insert is rolled back by the server before the error reaches the caller.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(
        &self,
        short_code: &str,
        long_url: &str,
    ) -> Result<UrlMapping, RepositoryError> {
        sqlx::query_as::<_, UrlMapping>(
            r#"
            INSERT INTO urls (short_code, long_url)
            VALUES ($1, $2)
            RETURNING id, short_code, long_url, created_at
            "#,
        )
        .bind(short_code)
        .bind(long_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match RepositoryError::from(e) {
            RepositoryError::DuplicateCode(_) => {
                RepositoryError::DuplicateCode(short_code.to_string())
            }
            other => other,
        })
    }

    async fn find_long_url_by_code(
        &self,
        short_code: &str,
    ) -> Result<Option<String>, RepositoryError> {
        let long_url = sqlx::query_scalar::<_, String>(
            "SELECT long_url FROM urls WHERE short_code = $1 LIMIT 1",
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(long_url)
    }

    async fn find_code_by_long_url(
        &self,
        long_url: &str,
    ) -> Result<Option<String>, RepositoryError> {
        let short_code = sqlx::query_scalar::<_, String>(
            "SELECT short_code FROM urls WHERE long_url = $1 ORDER BY id ASC LIMIT 1",
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(short_code)
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
