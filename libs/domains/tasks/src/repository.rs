use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{Task, TaskId};
use crate::schema::TaskPayload;

/// Repository trait for Task persistence
///
/// `add_task` receives the raw payload and owns the full schema check:
/// a task is stored, and an id consumed, only when the payload is valid.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Validate and store a new task
    async fn add_task(&self, payload: TaskPayload) -> TaskResult<Task>;

    /// Get a task by ID
    async fn get_by_id(&self, id: TaskId) -> TaskResult<Option<Task>>;

    /// Count all tasks
    async fn count(&self) -> TaskResult<usize>;
}
