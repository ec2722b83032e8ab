//! Domain layer containing entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on the HTTP surface. Business logic lives
//! in [`crate::application`].

pub mod entities;
pub mod repositories;
