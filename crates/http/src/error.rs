//! Error handling for bookshelf HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Standard error response format for all HTTP errors
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub details: Vec<serde_json::Value>,
    pub message: String,
    pub code: String,
    pub trace_id: String,
    pub timestamp: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error("storage unavailable: {message}")]
    Unavailable { message: String, code: String },
}

impl AppError {
    /// Create a validation error
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            code: "validation_error".to_string(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    /// Create an error for a backing store that cannot serve the request
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            code: "storage_unavailable".to_string(),
        }
    }

    fn into_parts(self) -> (StatusCode, ErrorBody) {
        let (status, code, message, details) = match self {
            AppError::Validation {
                details,
                code,
                message,
            } => (StatusCode::BAD_REQUEST, code, message, details),
            AppError::NotFound { message, code } => {
                (StatusCode::NOT_FOUND, code, message, Vec::new())
            }
            AppError::BadRequest { message, code } => {
                (StatusCode::BAD_REQUEST, code, message, Vec::new())
            }
            AppError::Unavailable { message, code } => {
                (StatusCode::SERVICE_UNAVAILABLE, code, message, Vec::new())
            }
        };

        let body = ErrorBody {
            details,
            message,
            code,
            trace_id: Uuid::now_v7().to_string(),
            timestamp: OffsetDateTime::now_utc().to_string(),
        };
        (status, body)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, mut body) = self.into_parts();

        if status.is_server_error() {
            tracing::error!(
                error_id = %body.trace_id,
                error_code = %body.code,
                status_code = %status.as_u16(),
                error = %body.message,
                "request failed"
            );
        } else {
            tracing::warn!(
                error_id = %body.trace_id,
                error_code = %body.code,
                status_code = %status.as_u16(),
                "request rejected"
            );
        }

        // Release builds keep driver details out of 5xx bodies
        if cfg!(not(debug_assertions)) && status.is_server_error() {
            body.message = "storage is temporarily unavailable".to_string();
        }

        (status, Json(json!({ "error": body }))).into_response()
    }
}
