//! Validation of long URLs submitted for shortening.
//!
//! Runs at the HTTP boundary, before the allocation engine sees the input.

use url::Url;

/// Reasons a long URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LongUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Parses and canonicalizes a long URL.
///
/// The result is the `url` crate's serialization: scheme and host lowercased,
/// default ports dropped, an empty path written as `/`. Query and fragment are
/// kept as submitted since both can be meaningful to the target.
///
/// # Errors
///
/// - [`LongUrlError::InvalidFormat`] for unparseable input
/// - [`LongUrlError::UnsupportedProtocol`] for anything but `http`/`https`
/// - [`LongUrlError::MissingHost`] when the authority is empty
///
/// # Examples
///
/// ```
/// use linkfold::utils::long_url::canonicalize_long_url;
///
/// assert_eq!(
///     canonicalize_long_url("HTTPS://Example.COM:443/Path?q=1").unwrap(),
///     "https://example.com/Path?q=1"
/// );
/// assert!(canonicalize_long_url("not-a-valid-url").is_err());
/// ```
pub fn canonicalize_long_url(input: &str) -> Result<String, LongUrlError> {
    let url = Url::parse(input.trim()).map_err(|e| LongUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(LongUrlError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(LongUrlError::MissingHost);
    }

    Ok(url.to_string())
}
