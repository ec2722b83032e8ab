//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`      - Create (or look up) the short URL for a long URL
//! - `GET  /health`       - Health check: durable store and cache
//! - `GET  /{short_code}` - Redirect to the long URL
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the application router with all routes and middleware.
///
/// axum prefers static routes over the `/{short_code}` capture, so a request
/// for `/health` or `/shorten` never reaches the redirect handler. The engine
/// never allocates those codes (see [`crate::application::services::RESERVED_CODES`]).
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{short_code}", get(redirect_handler))
        .layer(tracing::layer())
        .with_state(state)
}

/// [`api_router`] wrapped in trailing-slash normalization, as served.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state))
}
