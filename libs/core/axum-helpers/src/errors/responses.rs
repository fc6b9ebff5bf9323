//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 1005,
        "kind": "INTERNAL_ERROR",
        "error": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - business rule violated or malformed JSON",
    content_type = "application/json",
    example = json!({
        "code": 1000,
        "kind": "BAD_REQUEST",
        "error": "Invalid location. Must be 'ames' or 'boone'."
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - a field failed schema validation",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "kind": "VALIDATION_ERROR",
        "error": "Missing required field: title",
        "field": "title"
    })
)]
pub struct ValidationErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Method Not Allowed",
    content_type = "application/json",
    example = json!({
        "code": 1012,
        "kind": "METHOD_NOT_ALLOWED",
        "error": "Method Not Allowed"
    })
)]
pub struct MethodNotAllowedResponse(pub ErrorResponse);
