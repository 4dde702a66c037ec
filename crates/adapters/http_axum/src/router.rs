//! Axum router assembly.

use axum::Json;
use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use taskhub_app::ports::{ProjectRepository, TaskRepository, UserRepository};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the API routes under `api_prefix` (e.g. `/api/rust`), which must
/// start with `/` and must not be `/` itself. Layers, innermost first:
/// permissive CORS, a `Content-Type: application/json` override on every
/// response, and a [`TraceLayer`] that logs each request/response through
/// `tracing`.
pub fn build<PR, TR, UR>(state: AppState<PR, TR, UR>, api_prefix: &str) -> Router
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest(api_prefix, crate::api::routes())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(cors())
        .layer(SetResponseHeaderLayer::overriding(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use taskhub_app::services::project_service::ProjectService;
    use taskhub_app::services::task_service::TaskService;
    use taskhub_app::services::user_service::UserService;
    use taskhub_domain::error::TaskHubError;
    use taskhub_domain::id::{ProjectId, TaskId, UserId};
    use taskhub_domain::project::Project;
    use taskhub_domain::task::Task;
    use taskhub_domain::user::User;
    use tower::ServiceExt;

    struct StubProjectRepo;
    struct StubTaskRepo;
    struct StubUserRepo;

    impl ProjectRepository for StubProjectRepo {
        async fn create(&self, project: Project) -> Result<Project, TaskHubError> {
            Ok(project)
        }
        async fn get_by_id(&self, _id: ProjectId) -> Result<Option<Project>, TaskHubError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Project>, TaskHubError> {
            Ok(vec![])
        }
        async fn exists(&self, _id: ProjectId) -> Result<bool, TaskHubError> {
            Ok(false)
        }
        async fn update(&self, _project: Project) -> Result<Option<Project>, TaskHubError> {
            Ok(None)
        }
        async fn delete(&self, _id: ProjectId) -> Result<bool, TaskHubError> {
            Ok(false)
        }
    }

    impl TaskRepository for StubTaskRepo {
        async fn create(&self, task: Task) -> Result<Task, TaskHubError> {
            Ok(task)
        }
        async fn get_by_id(&self, _id: TaskId) -> Result<Option<Task>, TaskHubError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Task>, TaskHubError> {
            Ok(vec![])
        }
        async fn find_by_project(&self, _id: ProjectId) -> Result<Vec<Task>, TaskHubError> {
            Ok(vec![])
        }
        async fn update(&self, _task: Task) -> Result<Option<Task>, TaskHubError> {
            Ok(None)
        }
        async fn delete(&self, _id: TaskId) -> Result<bool, TaskHubError> {
            Ok(false)
        }
    }

    impl UserRepository for StubUserRepo {
        async fn create(&self, user: User) -> Result<User, TaskHubError> {
            Ok(user)
        }
        async fn get_by_id(&self, _id: UserId) -> Result<Option<User>, TaskHubError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<User>, TaskHubError> {
            Err(TaskHubError::Storage(Box::new(std::io::Error::other(
                "database unavailable",
            ))))
        }
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, TaskHubError> {
            Ok(None)
        }
        async fn update(&self, _user: User) -> Result<Option<User>, TaskHubError> {
            Ok(None)
        }
        async fn delete(&self, _id: UserId) -> Result<bool, TaskHubError> {
            Ok(false)
        }
    }

    fn app() -> Router {
        let state = AppState::new(
            ProjectService::new(StubProjectRepo),
            TaskService::new(StubTaskRepo, StubProjectRepo),
            UserService::new(StubUserRepo),
        );
        build(state, "/api/rust")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn should_force_json_content_type_on_every_response() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/rust/projects")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[tokio::test]
    async fn should_return_json_404_for_unknown_route() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(body_json(response).await["error"], "route not found");
    }

    #[tokio::test]
    async fn should_return_json_405_for_unsupported_method() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/api/rust/projects")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(body_json(response).await["error"], "method not allowed");
    }

    #[tokio::test]
    async fn should_return_json_405_on_health_route() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_json(response).await["error"], "method not allowed");
    }

    #[tokio::test]
    async fn should_answer_cors_preflight_for_any_origin() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/rust/projects")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn should_reject_unparsable_id_with_400() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/rust/projects/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_404_when_project_missing() {
        let uri = format!("/api/rust/projects/{}", ProjectId::new());
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_reject_malformed_json_with_400() {
        let response = app()
            .oneshot(post_json("/api/rust/projects", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn should_reject_project_without_name() {
        let response = app()
            .oneshot(post_json("/api/rust/projects", r#"{"description":"x"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "name must not be empty"
        );
    }

    #[tokio::test]
    async fn should_return_created_project() {
        let response = app()
            .oneshot(post_json(
                "/api/rust/projects",
                r#"{"name":"Website","description":"public site"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Website");
        assert_eq!(body["description"], "public site");
        assert!(body["id"].is_string());
        assert!(body["created_at"].is_string());
    }

    #[tokio::test]
    async fn should_reject_task_for_unknown_project_with_400() {
        let body = format!(
            r#"{{"description":"Draft","due_date":"2025-06-01","project_id":"{}"}}"#,
            ProjectId::new()
        );
        let response = app()
            .oneshot(post_json("/api/rust/tasks", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_hide_storage_failure_behind_500() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/rust/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["error"],
            "internal server error"
        );
    }
}
