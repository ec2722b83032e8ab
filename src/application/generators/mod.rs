//! Short code generation strategies.
//!
//! One [`CodeGenerator`] trait, two implementations, chosen once at startup:
//!
//! - [`RandomCodeGenerator`] - fixed-length codes sampled from a CSPRNG (default)
//! - [`SequentialCodeGenerator`] - base62 of an atomic counter held by the cache tier

mod random;
mod sequential;

pub use random::{DEFAULT_CODE_LENGTH, RandomCodeGenerator};
pub use sequential::{COUNTER_KEY, SequentialCodeGenerator};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Which generator the service runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeStrategy {
    #[default]
    Random,
    Sequential,
}

impl fmt::Display for CodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str("random"),
            Self::Sequential => f.write_str("sequential"),
        }
    }
}

impl FromStr for CodeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "sequential" => Ok(Self::Sequential),
            other => Err(format!(
                "unknown code strategy '{}', expected 'random' or 'sequential'",
                other
            )),
        }
    }
}

/// Produces candidate short codes.
///
/// Generators never consult the durable store. A candidate may collide with an
/// existing code (random mode); the allocation loop in
/// [`crate::application::services::LinkService`] handles that.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Returns the next candidate code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CacheUnavailable`] if a sequential generator cannot
    /// reach its counter.
    async fn next_code(&self) -> Result<String, AppError>;

    /// The strategy this generator implements.
    fn strategy(&self) -> CodeStrategy;
}

/// Builds the generator selected by configuration.
///
/// `counter` is only used in sequential mode.
pub fn build_generator(
    strategy: CodeStrategy,
    code_length: usize,
    counter: Arc<dyn CacheService>,
) -> Arc<dyn CodeGenerator> {
    match strategy {
        CodeStrategy::Random => Arc::new(RandomCodeGenerator::new(code_length)),
        CodeStrategy::Sequential => Arc::new(SequentialCodeGenerator::new(counter)),
    }
}
