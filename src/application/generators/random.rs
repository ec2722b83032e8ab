use async_trait::async_trait;

use super::{CodeGenerator, CodeStrategy};
use crate::error::AppError;
use crate::utils::base62::random_code;

/// Default code length in random mode.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Samples fixed-length codes uniformly from the base62 alphabet.
///
/// Codes are unpredictable but can collide; at length 6 there are 62^6
/// (about 5.7e10) possible codes.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

#[async_trait]
impl CodeGenerator for RandomCodeGenerator {
    async fn next_code(&self) -> Result<String, AppError> {
        Ok(random_code(self.length))
    }

    fn strategy(&self) -> CodeStrategy {
        CodeStrategy::Random
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base62::is_base62;

    #[tokio::test]
    async fn test_default_length_is_six() {
        let generator = RandomCodeGenerator::default();
        let code = generator.next_code().await.unwrap();

        assert_eq!(code.len(), 6);
        assert!(is_base62(&code));
    }

    #[tokio::test]
    async fn test_custom_length() {
        let generator = RandomCodeGenerator::new(16);
        assert_eq!(generator.next_code().await.unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_consecutive_codes_differ() {
        let generator = RandomCodeGenerator::new(10);
        let a = generator.next_code().await.unwrap();
        let b = generator.next_code().await.unwrap();
        assert_ne!(a, b);
    }
}
