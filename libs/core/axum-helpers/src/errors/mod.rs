pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error response structure.
///
/// Every failure response carries this envelope:
/// - `code`: Integer error code for logging/monitoring (e.g., 1001)
/// - `kind`: Machine-readable error identifier (e.g., "VALIDATION_ERROR")
/// - `error`: Human-readable error message
/// - `field`: The offending request field, when exactly one is at fault
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1001,
///   "kind": "VALIDATION_ERROR",
///   "error": "Missing required field: title",
///   "field": "title"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub kind: String,
    /// Human-readable error message
    pub error: String,
    /// Request field the error refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    /// Body is not syntactically valid JSON. Carries the parser detail for
    /// logs only; clients get a fixed message.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Validation error on '{field}': {message}")]
    FieldValidation { field: String, message: String },

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Shorthand for a single-field validation failure.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::FieldValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, field, code) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (e.status(), e.body_text(), None, ErrorCode::JsonExtraction)
            }
            AppError::InvalidJson(detail) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidJson.code(),
                    "Invalid JSON body: {}",
                    detail
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidJson.default_message().to_string(),
                    None,
                    ErrorCode::InvalidJson,
                )
            }
            AppError::FieldValidation { field, message } => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    field = %field,
                    "Validation error: {}",
                    message
                );
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    message,
                    Some(field),
                    ErrorCode::ValidationError,
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg, None, ErrorCode::BadRequest)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg, None, ErrorCode::NotFound)
            }
            AppError::MethodNotAllowed => {
                tracing::info!(
                    error_code = ErrorCode::MethodNotAllowed.code(),
                    "Method not allowed"
                );
                (
                    StatusCode::METHOD_NOT_ALLOWED,
                    ErrorCode::MethodNotAllowed.default_message().to_string(),
                    None,
                    ErrorCode::MethodNotAllowed,
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError.default_message().to_string(),
                    None,
                    ErrorCode::InternalError,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            kind: code.as_str().to_string(),
            error: message,
            field,
        });

        (status, body).into_response()
    }
}
