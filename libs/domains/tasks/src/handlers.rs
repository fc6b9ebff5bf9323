use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use axum_helpers::{
    JsonObject,
    errors::{
        handlers::method_not_allowed,
        responses::{
            BadRequestResponse, InternalServerErrorResponse, MethodNotAllowedResponse,
            ValidationErrorResponse,
        },
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TaskResult;
use crate::models::{CreateTask, Location, Task};
use crate::repository::TaskRepository;
use crate::schema;
use crate::service::TaskService;

/// OpenAPI documentation for Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(create_task),
    components(
        schemas(Task, CreateTask, Location),
        responses(
            BadRequestResponse,
            ValidationErrorResponse,
            MethodNotAllowedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "tasks", description = "Task management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the task router. Only `POST /tasks` is served; any other method
/// on that path answers 405 with the JSON error envelope.
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/tasks", post(create_task).fallback(method_not_allowed))
        .with_state(shared_service)
}

/// Create a new task
#[utoipa::path(
    post,
    path = "/tasks",
    tag = "tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created successfully", body = Task),
        (status = 400, response = BadRequestResponse),
        (status = 405, response = MethodNotAllowedResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    JsonObject(body): JsonObject,
) -> TaskResult<impl IntoResponse> {
    schema::check_shape(&body)?;
    let input = CreateTask::try_from(&body)?;

    let task = service.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}
