use async_trait::async_trait;
use std::sync::Arc;

use super::{CodeGenerator, CodeStrategy};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::base62::encode;

/// Cache key of the shared allocation counter.
///
/// Lives outside the `url:` projection namespace so no short code can ever
/// shadow it.
pub const COUNTER_KEY: &str = "counter:url_id";

/// Encodes successive values of a counter owned by the cache tier.
///
/// The counter is advanced only through [`CacheService::incr`], never read and
/// written back, so concurrent requests and multiple instances sharing one
/// Redis each get a distinct value. Codes are short and collision-free but
/// reveal creation order and volume.
pub struct SequentialCodeGenerator {
    counter: Arc<dyn CacheService>,
}

impl SequentialCodeGenerator {
    pub fn new(counter: Arc<dyn CacheService>) -> Self {
        Self { counter }
    }
}

#[async_trait]
impl CodeGenerator for SequentialCodeGenerator {
    async fn next_code(&self) -> Result<String, AppError> {
        let value = self.counter.incr(COUNTER_KEY).await?;
        Ok(encode(value))
    }

    fn strategy(&self) -> CodeStrategy {
        CodeStrategy::Sequential
    }
}
