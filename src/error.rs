//! Error types shared across layers and their HTTP representation.
//!
//! - [`RepositoryError`] - durable store failures, with the duplicate short code
//!   surfaced as its own variant so the allocation loop can retry on it
//! - [`AppError`] - service-level errors rendered as JSON responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::infrastructure::cache::CacheError;

/// Name of the unique constraint guarding `urls.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "urls_short_code_key";

/// Failures reported by a [`crate::domain::repositories::UrlRepository`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The short code is already committed to another mapping.
    #[error("short code already exists: {0}")]
    DuplicateCode(String),

    /// Any other storage failure (connection, query, constraint on another column).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
            && db.constraint() == Some(SHORT_CODE_CONSTRAINT)
        {
            return Self::DuplicateCode(db.message().to_string());
        }

        Self::Unavailable(e.to_string())
    }
}

/// JSON body of an error response.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application error returned by services and handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input rejected at the boundary.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Expected absence (unknown short code).
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Every allocation attempt hit an existing short code.
    #[error("{message}")]
    AllocationExhausted { message: String, details: Value },

    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },

    #[error("{message}")]
    CacheUnavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn allocation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::AllocationExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn cache_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::CacheUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, &str, &Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::AllocationExhausted { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "allocation_exhausted",
                message,
                details,
            ),
            AppError::StoreUnavailable { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "store_unavailable",
                message,
                details,
            ),
            AppError::CacheUnavailable { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "cache_unavailable",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    /// Converts the error into its serializable description.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::DuplicateCode(reason) => AppError::internal(
                "Unhandled duplicate short code",
                json!({ "reason": reason }),
            ),
            RepositoryError::Unavailable(reason) => {
                AppError::store_unavailable("Durable store error", json!({ "reason": reason }))
            }
        }
    }
}

impl From<CacheError> for AppError {
    fn from(e: CacheError) -> Self {
        AppError::cache_unavailable("Cache error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid request", json!({ "fields": e.to_string() }))
    }
}
