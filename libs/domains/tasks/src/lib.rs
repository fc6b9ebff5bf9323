//! Tasks Domain
//!
//! Creation of tasks over HTTP, backed by an in-memory store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST /tasks, request shape
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Required fields, location rule
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Full schema check, id assignment, storage
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use domain_tasks::{InMemoryTaskRepository, TaskService, handlers};
//!
//! let service = TaskService::new(InMemoryTaskRepository::new());
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod service;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::{TaskError, TaskResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryTaskRepository;
pub use models::{CreateTask, Location, Task, TaskId};
pub use repository::TaskRepository;
pub use schema::{SchemaError, TaskPayload};
pub use service::TaskService;
