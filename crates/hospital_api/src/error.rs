//! Error types for the registry HTTP API.
//!
//! # Error Mapping
//!
//! | Core error | HTTP Status | `code` |
//! |------------|-------------|--------|
//! | `RepoError::Validation`, body/path rejection | 400 | `validation` |
//! | `RepoError::NotFound` | 404 | `not_found` |
//! | body over `max_body_size` | 413 | `payload_too_large` |
//! | `RepoError::Integrity` | 409 | `integrity` |
//! | `RepoError::Db`, `RepoError::InvalidData` | 500 | `internal` |
//!
//! Bodies have the shape `{"error": {"code": "...", "message": "..."}}`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hospital_core::{EntityKind, RepoError};
use log::{error, warn};
use std::fmt;

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Caller-facing error for every endpoint.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed body, bad path id or rejected field values (HTTP 400).
    Validation(String),
    /// Target record does not exist (HTTP 404).
    NotFound { entity: EntityKind, id: i64 },
    /// Request body exceeded the configured limit (HTTP 413).
    PayloadTooLarge(String),
    /// Store-level constraint failure (HTTP 409).
    Integrity(String),
    /// Anything else (HTTP 500). The message is logged, never returned.
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(message) => write!(f, "Validation error: {}", message),
            ApiError::NotFound { entity, id } => write!(f, "{} {} not found", entity, id),
            ApiError::PayloadTooLarge(message) => write!(f, "Payload too large: {}", message),
            ApiError::Integrity(message) => write!(f, "Integrity error: {}", message),
            ApiError::Internal(message) => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Integrity(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::NotFound { .. } => "not_found",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::Integrity(_) => "integrity",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(detail) => {
                error!(
                    "event=request_error module=api status=error error_code={} error={}",
                    self.code(),
                    detail
                );
                "internal server error".to_string()
            }
            other => {
                warn!(
                    "event=request_error module=api status=rejected error_code={} http_status={}",
                    other.code(),
                    status.as_u16()
                );
                match other {
                    ApiError::Validation(message)
                    | ApiError::PayloadTooLarge(message)
                    | ApiError::Integrity(message) => {
                        message.clone()
                    }
                    _ => other.to_string(),
                }
            }
        };

        let body = serde_json::json!({
            "error": {
                "code": self.code(),
                "message": message,
            }
        });
        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Validation(err) => ApiError::Validation(err.to_string()),
            RepoError::NotFound { entity, id } => ApiError::NotFound { entity, id },
            RepoError::Integrity(message) => ApiError::Integrity(message),
            RepoError::Db(err) => ApiError::Internal(err.to_string()),
            RepoError::InvalidData(message) => ApiError::Internal(message),
        }
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::Validation(rejection.body_text())
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
