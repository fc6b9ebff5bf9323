use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Location, Task, TaskId};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new task.
    ///
    /// Checks required fields and the location rule, then hands the payload
    /// to the repository, which assigns the id and validates the rest.
    #[instrument(skip(self, input))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        if let Some(field) = input.first_missing_field() {
            return Err(TaskError::MissingField(field));
        }

        if let Some(location) = input.location.as_deref() {
            if location.parse::<Location>().is_err() {
                return Err(TaskError::InvalidLocation(location.to_string()));
            }
        }

        let user_name = input.user_name.as_deref().unwrap_or_default();
        info!("Creating task for user: {}", user_name);

        self.repository.add_task(input.into_payload()).await
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: TaskId) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Number of stored tasks
    pub async fn count_tasks(&self) -> TaskResult<usize> {
        self.repository.count().await
    }
}
