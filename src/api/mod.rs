//! HTTP surface over the allocation/resolution engine.
//!
//! Translates requests into [`crate::application::services::LinkService`] calls
//! and formats the results. Input validation happens here, before the engine.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
