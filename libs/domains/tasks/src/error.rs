use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::models::TaskId;
use crate::schema::SchemaError;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid location. Must be 'ames' or 'boone'.")]
    InvalidLocation(String),

    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Schema(e) => AppError::field(e.field(), e.to_string()),
            TaskError::MissingField(_) | TaskError::InvalidLocation(_) => {
                AppError::BadRequest(err.to_string())
            }
            TaskError::NotFound(_) => AppError::NotFound(err.to_string()),
            TaskError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
