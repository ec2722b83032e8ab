//! Application layer: the allocation/resolution engine and its code generators.
//!
//! - [`services::LinkService`] - shorten (lookup-or-create) and resolve (cache-aside)
//! - [`generators`] - random and sequential short code strategies

pub mod generators;
pub mod services;
