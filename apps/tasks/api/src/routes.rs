use axum::Router;
use axum_helpers::{create_router, health_router};
use domain_tasks::{InMemoryTaskRepository, TaskService, handlers};

use crate::config::Config;
use crate::openapi::ApiDoc;

/// Assemble the full application: task routes, docs, middleware, health.
pub fn app(config: &Config) -> Router {
    let service = TaskService::new(InMemoryTaskRepository::new());

    // create_router adds docs/middleware to our composed routes
    create_router::<ApiDoc>(handlers::router(service)).merge(health_router(config.app))
}
