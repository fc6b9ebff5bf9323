use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskId};
use crate::repository::TaskRepository;
use crate::schema::{self, TaskPayload};

#[derive(Debug)]
struct Store {
    next_id: TaskId,
    tasks: Vec<Task>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            tasks: Vec::new(),
        }
    }
}

/// In-memory task store. Cloning shares the same store.
#[derive(Clone, Default)]
pub struct InMemoryTaskRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn add_task(&self, payload: TaskPayload) -> TaskResult<Task> {
        let fields = schema::validate(&payload)?;

        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id = id
            .checked_add(1)
            .ok_or_else(|| TaskError::Internal("task id space exhausted".to_string()))?;

        let task = Task::new(id, fields);
        store.tasks.push(task.clone());
        drop(store);

        info!(task_id = id, "Task created: {}", id);
        Ok(task)
    }

    async fn get_by_id(&self, id: TaskId) -> TaskResult<Option<Task>> {
        let store = self.store.read().await;
        Ok(store.tasks.iter().find(|task| task.id == id).cloned())
    }

    async fn count(&self) -> TaskResult<usize> {
        Ok(self.store.read().await.tasks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use crate::schema::SchemaError;
    use crate::test_support::capture_logs;
    use serde_json::{Value, json};

    fn payload(value: Value) -> TaskPayload {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn valid() -> TaskPayload {
        payload(json!({
            "title": "Walk the dog",
            "description": "Evening walk around the block.",
            "priority": 1,
            "due_date": "2024-08-01",
            "user_name": "bob"
        }))
    }

    #[tokio::test]
    async fn test_add_task_assigns_sequential_ids() {
        let repo = InMemoryTaskRepository::new();

        let first = repo.add_task(valid()).await.unwrap();
        let second = repo.add_task(valid()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.location, None);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_identical_payloads_get_distinct_ids() {
        let repo = InMemoryTaskRepository::new();

        let a = repo.add_task(valid()).await.unwrap();
        let b = repo.add_task(valid()).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.title, b.title);
    }

    #[tokio::test]
    async fn test_rejected_payload_consumes_no_id() {
        let repo = InMemoryTaskRepository::new();
        repo.add_task(valid()).await.unwrap();

        let mut bad = valid();
        bad.insert("priority".to_string(), json!(9));
        let err = repo.add_task(bad).await.unwrap_err();
        assert!(matches!(
            err,
            TaskError::Schema(SchemaError::OutOfRange { field: "priority", .. })
        ));

        let next = repo.add_task(valid()).await.unwrap();
        assert_eq!(next.id, 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_add_task_logs_assigned_id() {
        let (logs, _guard) = capture_logs();
        let repo = InMemoryTaskRepository::new();

        repo.add_task(valid()).await.unwrap();

        let output = logs.contents();
        assert_eq!(output.matches("Task created: 1").count(), 1);
        assert!(output.contains("task_id=1"));
    }

    #[tokio::test]
    async fn test_rejected_payload_logs_no_creation() {
        let (logs, _guard) = capture_logs();
        let repo = InMemoryTaskRepository::new();

        let mut bad = valid();
        bad.insert("title".to_string(), json!(""));
        assert!(repo.add_task(bad).await.is_err());

        assert!(!logs.contents().contains("Task created"));
    }

    #[tokio::test]
    async fn test_add_task_keeps_optional_fields() {
        let repo = InMemoryTaskRepository::new();
        let mut body = valid();
        body.insert("location".to_string(), json!("boone"));
        body.insert("tag".to_string(), json!("pets"));

        let task = repo.add_task(body).await.unwrap();

        assert_eq!(task.location, Some(Location::Boone));
        assert_eq!(task.tag.as_deref(), Some("pets"));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let repo = InMemoryTaskRepository::new();
        let created = repo.add_task(valid()).await.unwrap();

        assert_eq!(repo.get_by_id(created.id).await.unwrap(), Some(created));
        assert_eq!(repo.get_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let repo = InMemoryTaskRepository::new();
        let other = repo.clone();

        repo.add_task(valid()).await.unwrap();
        let task = other.add_task(valid()).await.unwrap();

        assert_eq!(task.id, 2);
        assert_eq!(other.count().await.unwrap(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_get_unique_ids() {
        let repo = InMemoryTaskRepository::new();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.add_task(valid()).await.unwrap().id })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=50).collect::<Vec<TaskId>>());
    }
}
