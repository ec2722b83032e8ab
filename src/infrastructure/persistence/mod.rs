//! Durable store implementations.
//!
//! - [`PgUrlRepository`] - PostgreSQL via SQLx
//! - [`InMemoryUrlRepository`] - process-local store for tests and local runs

pub mod memory_url_repository;
pub mod pg_url_repository;

pub use memory_url_repository::InMemoryUrlRepository;
pub use pg_url_repository::PgUrlRepository;
