//! Business logic services for the application layer.

pub mod link_service;

pub use link_service::{
    CACHE_KEY_PREFIX, LinkService, MAX_ALLOCATION_ATTEMPTS, MAX_SHORT_CODE_LENGTH,
    RESERVED_CODES, ShortenOutcome, is_reserved_code, projection_key,
};
