//! JSON REST handlers for projects.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use taskhub_app::ports::{ProjectRepository, TaskRepository, UserRepository};
use taskhub_domain::id::ProjectId;
use taskhub_domain::project::{Project, ProjectChanges};

use super::{Message, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a project.
#[derive(Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Project>>),
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
    Ok(Json<Project>),
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
    Created(Json<Project>),
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
                message: "project deleted",
            })
            .into_response(),
        }
    }
}

/// `GET /projects`
pub async fn list<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
) -> Result<ListResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let projects = state.project_service.list_projects().await?;
    Ok(ListResponse::Ok(Json(projects)))
}

/// `GET /projects/:id`
pub async fn get<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let project_id: ProjectId = parse_id(&id)?;
    let project = state.project_service.get_project(project_id).await?;
    Ok(GetResponse::Ok(Json(project)))
}

/// `POST /projects`
pub async fn create<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let mut builder = Project::builder().name(req.name);
    if let Some(description) = req.description.filter(|d| !d.trim().is_empty()) {
        builder = builder.description(description);
    }

    let project = builder.build()?;
    let created = state.project_service.create_project(project).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /projects/:id`
pub async fn update<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
    Path(id): Path<String>,
    payload: Result<Json<ProjectChanges>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let project_id: ProjectId = parse_id(&id)?;
    let Json(changes) = payload?;
    let project = state
        .project_service
        .update_project(project_id, changes)
        .await?;
    Ok(GetResponse::Ok(Json(project)))
}

/// `DELETE /projects/:id`
pub async fn delete<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let project_id: ProjectId = parse_id(&id)?;
    state.project_service.delete_project(project_id).await?;
    Ok(DeleteResponse::Deleted)
}
