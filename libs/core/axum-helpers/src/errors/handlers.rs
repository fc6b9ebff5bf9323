use axum::response::{IntoResponse, Response};

use super::{AppError, ErrorCode};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    AppError::NotFound(ErrorCode::NotFound.default_message().to_string()).into_response()
}

/// Handler for 405 Method Not Allowed errors.
///
/// Attach it with `MethodRouter::fallback` so unsupported methods on a known
/// route get the JSON envelope instead of an empty body.
pub async fn method_not_allowed() -> Response {
    AppError::MethodNotAllowed.into_response()
}
