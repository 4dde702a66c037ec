//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod projects;
#[allow(clippy::missing_errors_doc)]
pub mod tasks;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use std::str::FromStr;

use axum::Router;
use axum::routing::get;
use serde::Serialize;

use taskhub_app::ports::{ProjectRepository, TaskRepository, UserRepository};
use taskhub_domain::error::ValidationError;

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned by successful deletes.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// Parse a path segment into a typed identifier.
fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ValidationError::InvalidId(raw.to_string()).into())
}

/// Build the API sub-router, mounted by [`crate::router::build`] under the
/// configured prefix.
pub fn routes<PR, TR, UR>() -> Router<AppState<PR, TR, UR>>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    Router::new()
        // Projects
        .route(
            "/projects",
            get(projects::list::<PR, TR, UR>).post(projects::create::<PR, TR, UR>),
        )
        .route(
            "/projects/{id}",
            get(projects::get::<PR, TR, UR>)
                .put(projects::update::<PR, TR, UR>)
                .delete(projects::delete::<PR, TR, UR>),
        )
        .route(
            "/projects/{id}/tasks",
            get(tasks::list_for_project::<PR, TR, UR>),
        )
        // Tasks
        .route(
            "/tasks",
            get(tasks::list::<PR, TR, UR>).post(tasks::create::<PR, TR, UR>),
        )
        .route(
            "/tasks/{id}",
            get(tasks::get::<PR, TR, UR>)
                .put(tasks::update::<PR, TR, UR>)
                .delete(tasks::delete::<PR, TR, UR>),
        )
        // Users
        .route(
            "/users",
            get(users::list::<PR, TR, UR>).post(users::create::<PR, TR, UR>),
        )
        .route(
            "/users/{id}",
            get(users::get::<PR, TR, UR>)
                .put(users::update::<PR, TR, UR>)
                .delete(users::delete::<PR, TR, UR>),
        )
        .method_not_allowed_fallback(crate::router::method_not_allowed)
}
