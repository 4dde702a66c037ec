//! JSON REST handlers for users.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use taskhub_app::ports::{ProjectRepository, TaskRepository, UserRepository};
use taskhub_domain::id::UserId;
use taskhub_domain::user::{User, UserChanges};

use super::{Message, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a user.
#[derive(Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<User>>),
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
    Ok(Json<User>),
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
    Created(Json<User>),
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
                message: "user deleted",
            })
            .into_response(),
        }
    }
}

/// `GET /users`
pub async fn list<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
) -> Result<ListResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let users = state.user_service.list_users().await?;
    Ok(ListResponse::Ok(Json(users)))
}

/// `GET /users/:id`
pub async fn get<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let user_id: UserId = parse_id(&id)?;
    let user = state.user_service.get_user(user_id).await?;
    Ok(GetResponse::Ok(Json(user)))
}

/// `POST /users`
pub async fn create<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let user = User::builder().name(req.name).email(req.email).build()?;
    let created = state.user_service.create_user(user).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /users/:id`
pub async fn update<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
    Path(id): Path<String>,
    payload: Result<Json<UserChanges>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let user_id: UserId = parse_id(&id)?;
    let Json(changes) = payload?;
    let user = state.user_service.update_user(user_id, changes).await?;
    Ok(GetResponse::Ok(Json(user)))
}

/// `DELETE /users/:id`
pub async fn delete<PR, TR, UR>(
    State(state): State<AppState<PR, TR, UR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let user_id: UserId = parse_id(&id)?;
    state.user_service.delete_user(user_id).await?;
    Ok(DeleteResponse::Deleted)
}
