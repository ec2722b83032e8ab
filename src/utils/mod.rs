//! Helpers shared by the engine and the HTTP layer.
//!
//! - [`base62`] - Short code alphabet, encode/decode and random sampling
//! - [`long_url`] - Long URL validation at the request boundary

pub mod base62;
pub mod long_url;
