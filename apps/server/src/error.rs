//! # API Error Types
//!
//! What HTTP clients see when something fails.
//!
//! ## Status Mapping
//! ```text
//! ValidationError                  -> 400 Bad Request
//! ProductNotFound / NotFound       -> 404 Not Found
//! InsufficientStock / constraints  -> 409 Conflict
//! StorageError                     -> 500 Internal Server Error
//! ```
//!
//! Every error body has the same shape: `{"code": "...", "message": "..."}`.
//! Internal details are logged server-side, never leaked to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use vela_core::{CoreError, ValidationError};
use vela_db::{CheckoutError, DbError};

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request: missing fields, non-positive quantity, bad dates.
    #[error("{0}")]
    Validation(String),

    /// The referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request conflicts with current state (insufficient stock,
    /// duplicate name, referenced row).
    #[error("{0}")]
    Conflict(String),

    /// Storage or other internal failure. Clients get a generic message.
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::Internal(_) => "internal_error",
        }
    }

    /// A NotFound error for a missing entity, matching the storage layer's
    /// message shape.
    pub fn not_found(entity: &str, id: i64) -> Self {
        ApiError::NotFound(format!("{entity} not found: {id}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref detail) = self {
            error!(detail = %detail, "internal error serving request");
        }

        (
            self.status(),
            Json(json!({
                "code": self.code(),
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(_) => ApiError::NotFound(err.to_string()),
            CoreError::InsufficientStock { .. } => ApiError::Conflict(err.to_string()),
            CoreError::Validation(v) => v.into(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } => {
                ApiError::Conflict(err.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Domain(core) => core.into(),
            CheckoutError::Db(db) => db.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
