//! Server-specific error types
//!
//! Feature errors convert into [`AppError`], which owns the mapping to HTTP
//! status, log level and response body. Every rendered error also carries a
//! [`RecordedError`] response extension; the audit layer reads it to decide
//! the outcome of an audited request.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::features::shared::validation::ValidationErrors;

pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";
pub const MALFORMED_JSON_MESSAGE: &str = "Malformed JSON request";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";
pub const RESOURCE_NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";

/// Result type alias for handlers
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    InvalidSortParameter(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Marker left on every error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedError {
    pub status: StatusCode,
    pub kind: &'static str,
}

impl AppError {
    pub fn malformed_json() -> Self {
        AppError::Validation(ValidationErrors::single("request", MALFORMED_JSON_MESSAGE))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_)
            | AppError::InvalidSortParameter(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation",
            AppError::InvalidSortParameter(_) => "invalid_sort_parameter",
            AppError::BadRequest(_) => "bad_request",
            AppError::PayloadTooLarge { .. } => "payload_too_large",
            AppError::Database(_) => "database",
            AppError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        if status.is_server_error() {
            tracing::error!(error = ?self, kind, "An unexpected error occurred");
        } else {
            tracing::warn!(error = %self, kind, "Request failed");
        }

        let body = match self {
            AppError::Validation(errors) => {
                ErrorResponse::with_errors(status.as_u16(), VALIDATION_FAILED_MESSAGE, errors)
            },
            AppError::Database(_) | AppError::Internal(_) => {
                ErrorResponse::new(status.as_u16(), UNEXPECTED_ERROR_MESSAGE)
            },
            other => ErrorResponse::new(status.as_u16(), other.to_string()),
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(RecordedError { status, kind });
        response
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected JSON body");
        AppError::malformed_json()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
