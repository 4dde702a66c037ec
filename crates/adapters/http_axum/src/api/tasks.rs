//! JSON REST handlers for tasks.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use taskhub_app::ports::{ProjectRepository, TaskRepository, UserRepository};
use taskhub_domain::id::{ProjectId, TaskId};
use taskhub_domain::task::{Task, TaskChanges, TaskStatus};
use taskhub_domain::time::Date;

use super::{Message, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a task.
///
/// Everything except `status` is required; missing fields are reported by
/// the task builder rather than by the JSON decoder. A blank `status` falls
/// back to the default.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub description: String,
    pub status: Option<String>,
    pub due_date: Option<Date>,
    pub project_id: Option<ProjectId>,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Task>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Task>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Task>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted => Json(Message {
                message: "task deleted",
            })
            .into_response(),
        }
    }
}

/// `GET /tasks`
pub async fn list<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
) -> Result<ListResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let tasks = state.task_service.list_tasks().await?;
    Ok(ListResponse::Ok(Json(tasks)))
}

/// `GET /projects/:id/tasks`
pub async fn list_for_project<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
    Path(id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let project_id: ProjectId = parse_id(&id)?;
    let tasks = state.task_service.list_tasks_for_project(project_id).await?;
    Ok(ListResponse::Ok(Json(tasks)))
}

/// `GET /tasks/:id`
pub async fn get<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let task_id: TaskId = parse_id(&id)?;
    let task = state.task_service.get_task(task_id).await?;
    Ok(GetResponse::Ok(Json(task)))
}

/// `POST /tasks`
pub async fn create<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    tracing::debug!(?req, "creating task");

    let mut builder = Task::builder().description(req.description);
    if let Some(status) = TaskStatus::parse_optional(req.status.as_deref())? {
        builder = builder.status(status);
    }
    if let Some(due_date) = req.due_date {
        builder = builder.due_date(due_date);
    }
    if let Some(project_id) = req.project_id {
        builder = builder.project_id(project_id);
    }

    let task = builder.build()?;
    let created = state.task_service.create_task(task).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /tasks/:id`
pub async fn update<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
    Path(id): Path<String>,
    payload: Result<Json<TaskChanges>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let task_id: TaskId = parse_id(&id)?;
    let Json(changes) = payload?;
    let task = state.task_service.update_task(task_id, changes).await?;
    Ok(GetResponse::Ok(Json(task)))
}

/// `DELETE /tasks/:id`
pub async fn delete<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let task_id: TaskId = parse_id(&id)?;
    state.task_service.delete_task(task_id).await?;
    Ok(DeleteResponse::Deleted)
}
