//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its long URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// Resolution is cache-aside: a cache hit never touches the durable store; a
/// miss reads the store and repopulates the cache before redirecting.
///
/// # Errors
///
/// Returns 404 Not Found if the short code was never allocated.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let long_url = state
        .link_service
        .resolve(&short_code)
        .await?
        .ok_or_else(|| {
            AppError::not_found("Short URL not found", json!({ "short_code": short_code }))
        })?;

    let location = HeaderValue::from_str(&long_url).map_err(|_| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "short_code": short_code }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
