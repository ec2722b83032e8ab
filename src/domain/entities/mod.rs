//! Core domain entities.
//!
//! - [`UrlMapping`] - A committed short code and the long URL it points to

pub mod url_mapping;

pub use url_mapping::UrlMapping;
