//! Extractor for request bodies that must be a JSON object.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request, rejection::JsonRejection};
use serde_json::{Map, Value};

/// JSON object extractor that keeps the body untyped.
///
/// Useful when the handler validates field presence and types itself and
/// needs to report errors per field instead of serde's first failure.
///
/// - malformed JSON → `400 INVALID_JSON`
/// - missing `Content-Type: application/json` → axum's rejection status
/// - valid JSON that is not an object → `422 VALIDATION_ERROR` on field `body`
///
/// # Example
/// ```ignore
/// use axum::routing::post;
/// use axum_helpers::extractors::JsonObject;
///
/// async fn create(JsonObject(body): JsonObject) -> String {
///     format!("{} fields", body.len())
/// }
///
/// let app = axum::Router::new().route("/items", post(create));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonSyntaxError(e) => AppError::InvalidJson(e.body_text()),
                other => AppError::from(other),
            })?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            other => Err(AppError::field(
                "body",
                format!(
                    "Request body must be a JSON object, got {}",
                    json_kind(&other)
                ),
            )),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use axum::response::IntoResponse;

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_extracts_object() {
        let JsonObject(map) = JsonObject::from_request(json_request(r#"{"a": 1}"#), &())
            .await
            .unwrap();
        assert_eq!(map.get("a"), Some(&Value::from(1)));
    }

    #[tokio::test]
    async fn test_rejects_malformed_json_with_400() {
        let err = JsonObject::from_request(json_request("invalid json"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidJson(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_non_object_with_422() {
        let err = JsonObject::from_request(json_request("[1, 2]"), &())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("an array"));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_rejects_missing_content_type() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"a": 1}"#))
            .unwrap();
        let err = JsonObject::from_request(request, &()).await.unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }
}
