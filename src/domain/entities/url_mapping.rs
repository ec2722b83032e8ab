//! Url mapping entity: one committed short code and its long URL.

use chrono::{DateTime, Utc};

/// A committed `short_code -> long_url` mapping.
///
/// Created once by the allocation engine on the first successful insert and
/// never updated afterwards. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlMapping {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(id: i64, short_code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            short_code,
            long_url,
            created_at,
        }
    }
}
