//! Short code allocation and resolution.

use std::sync::Arc;

use metrics::counter;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::application::generators::{CodeGenerator, CodeStrategy};
use crate::domain::entities::UrlMapping;
use crate::domain::repositories::UrlRepository;
use crate::error::{AppError, RepositoryError};
use crate::infrastructure::cache::CacheService;
use crate::utils::base62::is_base62;

/// Namespace of the `short_code -> long_url` projection in the cache.
pub const CACHE_KEY_PREFIX: &str = "url:";

/// Insert attempts per shorten call before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 5;

/// Width of the `short_code` column; longer codes can never have been allocated.
pub const MAX_SHORT_CODE_LENGTH: usize = 16;

/// Path segments served by static routes. A short code equal to one of these
/// would be shadowed by the route and never redirect.
pub const RESERVED_CODES: &[&str] = &["health", "shorten"];

/// Returns true if `short_code` collides with a static route.
pub fn is_reserved_code(short_code: &str) -> bool {
    RESERVED_CODES.contains(&short_code)
}

/// Cache key holding the projection for `short_code`.
pub fn projection_key(short_code: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, short_code)
}

/// Result of a shorten call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutcome {
    pub short_code: String,
    pub short_url: String,
    /// True when the long URL already had a code and nothing was created.
    pub already_existed: bool,
}

/// Orchestrates shorten (lookup-or-create) and resolve (cache-aside read).
///
/// Holds no mutable state of its own. Short code uniqueness is delegated to
/// the durable store's unique constraint: candidates are inserted
/// optimistically and a [`RepositoryError::DuplicateCode`] triggers a retry
/// with a fresh candidate.
///
/// Two concurrent shorten calls for the same long URL can both miss the dedup
/// lookup and commit two different codes. Each code is still unique; only the
/// one-code-per-URL property is best effort.
pub struct LinkService<R: UrlRepository + ?Sized = dyn UrlRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    generator: Arc<dyn CodeGenerator>,
    base_url: String,
    cache_ttl_seconds: Option<u64>,
}

impl<R: UrlRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    ///
    /// # Arguments
    ///
    /// - `base_url` - Public prefix of short URLs; trailing slashes are stripped
    /// - `cache_ttl_seconds` - TTL for projection writes, `None` for no expiry
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        generator: Arc<dyn CodeGenerator>,
        base_url: &str,
        cache_ttl_seconds: Option<u64>,
    ) -> Self {
        Self {
            repository,
            cache,
            generator,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache_ttl_seconds,
        }
    }

    /// Public base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Strategy of the configured code generator.
    pub fn strategy(&self) -> CodeStrategy {
        self.generator.strategy()
    }

    /// Builds the full short URL for a code.
    pub fn short_url_for(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url, short_code)
    }

    /// Returns the short URL for `long_url`, creating a mapping if none exists.
    ///
    /// `long_url` is expected to be validated already.
    ///
    /// # Flow
    ///
    /// 1. Dedup: reuse the code already committed for `long_url`, if any
    /// 2. Allocate: up to [`MAX_ALLOCATION_ATTEMPTS`] generate-and-insert rounds
    /// 3. Write the new projection to the cache
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocationExhausted`] if every attempt collided.
    /// Returns [`AppError::StoreUnavailable`] or [`AppError::CacheUnavailable`]
    /// when a collaborator fails; nothing is cached after a failed insert.
    pub async fn shorten(&self, long_url: &str) -> Result<ShortenOutcome, AppError> {
        if let Some(short_code) = self.repository.find_code_by_long_url(long_url).await? {
            counter!("links_deduplicated_total").increment(1);
            debug!(short_code = %short_code, "Long URL already shortened");

            return Ok(ShortenOutcome {
                short_url: self.short_url_for(&short_code),
                short_code,
                already_existed: true,
            });
        }

        let mapping = self.allocate(long_url).await?;

        self.write_projection(&mapping.short_code, &mapping.long_url)
            .await?;

        counter!("links_created_total").increment(1);
        info!(
            id = mapping.id,
            short_code = %mapping.short_code,
            "Short link created"
        );

        Ok(ShortenOutcome {
            short_url: self.short_url_for(&mapping.short_code),
            short_code: mapping.short_code,
            already_existed: false,
        })
    }

    /// Resolves a short code to its long URL.
    ///
    /// Reads the cache first; on a miss falls back to the durable store and
    /// writes the result back with the configured TTL. Unknown codes are not
    /// cached.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(long_url))` if the code is allocated
    /// - `Ok(None)` if it is not
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CacheUnavailable`] or [`AppError::StoreUnavailable`]
    /// when a collaborator fails.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<String>, AppError> {
        if short_code.len() > MAX_SHORT_CODE_LENGTH || !is_base62(short_code) {
            counter!("resolve_not_found_total").increment(1);
            debug!(short_code = %short_code, "Malformed short code");
            return Ok(None);
        }

        if let Some(long_url) = self.cache.get(&projection_key(short_code)).await? {
            counter!("resolve_cache_hits_total").increment(1);
            return Ok(Some(long_url));
        }

        counter!("resolve_cache_misses_total").increment(1);

        let Some(long_url) = self.repository.find_long_url_by_code(short_code).await? else {
            counter!("resolve_not_found_total").increment(1);
            debug!(short_code = %short_code, "Short code not found");
            return Ok(None);
        };

        self.write_projection(short_code, &long_url).await?;

        Ok(Some(long_url))
    }

    /// Generates candidates until one is committed.
    async fn allocate(&self, long_url: &str) -> Result<UrlMapping, AppError> {
        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let candidate = self.generator.next_code().await?;

            if is_reserved_code(&candidate) {
                counter!("code_collisions_total").increment(1);
                debug!(short_code = %candidate, attempt, "Reserved short code, retrying");
                continue;
            }

            match self.repository.create(&candidate, long_url).await {
                Ok(mapping) => return Ok(mapping),
                Err(RepositoryError::DuplicateCode(code)) => {
                    counter!("code_collisions_total").increment(1);

                    match self.generator.strategy() {
                        CodeStrategy::Random => warn!(
                            short_code = %code,
                            attempt,
                            "Short code collision, retrying"
                        ),
                        // The counter should never hand out a committed value twice.
                        CodeStrategy::Sequential => error!(
                            short_code = %code,
                            attempt,
                            "Sequential short code already committed; counter is behind the store"
                        ),
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        counter!("code_allocation_exhausted_total").increment(1);
        error!(
            attempts = MAX_ALLOCATION_ATTEMPTS,
            "Failed to allocate a unique short code"
        );

        Err(AppError::allocation_exhausted(
            "Failed to allocate a unique short code",
            json!({ "attempts": MAX_ALLOCATION_ATTEMPTS }),
        ))
    }

    async fn write_projection(&self, short_code: &str, long_url: &str) -> Result<(), AppError> {
        let key = projection_key(short_code);

        match self.cache_ttl_seconds {
            Some(ttl) => self.cache.set_with_ttl(&key, long_url, ttl).await?,
            None => self.cache.set(&key, long_url).await?,
        }

        Ok(())
    }
}
