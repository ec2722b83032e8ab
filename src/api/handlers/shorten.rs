//! Handler for the shorten endpoint.

use axum::{Json, extract::State};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::long_url::canonicalize_long_url;

/// Creates the short URL for a long URL, or returns the existing one.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_url": "http://localhost:3000/aB3xY9",
///   "short_code": "aB3xY9",
///   "already_existed": false
/// }
/// ```
///
/// When the URL was shortened before, `already_existed` is `true` and
/// `message` is `"URL already exists."`.
///
/// # Errors
///
/// - 422 if the URL is malformed or not HTTP(S)
/// - 500 if no unique code could be allocated
/// - 503 if the store or cache is unavailable
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let long_url = canonicalize_long_url(&payload.url).map_err(|e| {
        AppError::bad_request("Invalid URL", json!({ "url": payload.url, "reason": e.to_string() }))
    })?;

    let outcome = state.link_service.shorten(&long_url).await?;

    Ok(Json(ShortenResponse {
        message: outcome
            .already_existed
            .then(|| "URL already exists.".to_string()),
        short_url: outcome.short_url,
        short_code: outcome.short_code,
        already_existed: outcome.already_existed,
    }))
}
