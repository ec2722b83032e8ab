//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the collaborator contracts used by the engine.
//!
//! # Modules
//!
//! - [`cache`] - Expiring key-value cache and atomic counter (Redis and in-memory)
//! - [`persistence`] - Durable url store (PostgreSQL and in-memory)

pub mod cache;
pub mod persistence;
