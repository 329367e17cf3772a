//! Unified error handling for the HTTP surface.
//!
//! Provides a unified `AppError` type mapping the domain's failure taxonomy
//! onto HTTP responses. All route handlers return `Result<T, AppError>`.
//! Every error is terminal for the request that raised it; nothing is
//! retried server-side.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use kirana_core::types::status::InvalidStatus;
use kirana_core::{OrderBuildError, PhoneError, RegistrationError};

use crate::db::RepositoryError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request payload failed domain validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Status value outside the enumerated set.
    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] InvalidStatus),

    /// Order submitted while the store-open gate is closed.
    #[error("Store is closed")]
    StoreClosed,

    /// Admin password rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Conflicting write (duplicate id).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("resource not found".to_owned()),
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Database(other),
        }
    }
}

impl From<RegistrationError> for AppError {
    fn from(err: RegistrationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<OrderBuildError> for AppError {
    fn from(err: OrderBuildError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::export::ExportError> for AppError {
    fn from(err: crate::export::ExportError) -> Self {
        Self::Internal(format!("csv export failed: {err}"))
    }
}

impl From<PhoneError> for AppError {
    fn from(err: PhoneError) -> Self {
        Self::Validation(format!("invalid phone number: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server-side failures get logged with detail; clients see a
        // generic message.
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Validation(_) | Self::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            // Well-formed request conflicting with current server state;
            // retryable once the admin reopens the store.
            Self::StoreClosed | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
