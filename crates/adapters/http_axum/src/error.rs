//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use taskhub_domain::error::{TaskHubError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Everything a handler can fail with, mapped to a status code on the way out.
#[derive(Debug)]
pub enum ApiError {
    /// Error raised by an application service.
    Domain(TaskHubError),
    /// Request body was not valid JSON for the endpoint.
    MalformedBody(String),
    /// No route matched the request.
    RouteNotFound,
    /// The route exists but does not accept the request method.
    MethodNotAllowed,
}

impl From<TaskHubError> for ApiError {
    fn from(err: TaskHubError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Domain(TaskHubError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(TaskHubError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Domain(TaskHubError::Conflict(err)) => (StatusCode::CONFLICT, err.to_string()),
            Self::Domain(TaskHubError::Storage(err)) => {
                tracing::error!(error = ?err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::MalformedBody(message) => (StatusCode::BAD_REQUEST, message),
            Self::RouteNotFound => (StatusCode::NOT_FOUND, "route not found".to_string()),
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "method not allowed".to_string(),
            ),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
