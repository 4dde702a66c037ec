//! Shared application state for axum handlers.

use std::sync::Arc;

use taskhub_app::ports::{ProjectRepository, TaskRepository, UserRepository};
use taskhub_app::services::project_service::ProjectService;
use taskhub_app::services::task_service::TaskService;
use taskhub_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch. The task
/// service needs its own project repository handle to check task → project
/// references. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<PR, TR, UR> {
    /// Project CRUD service.
    pub project_service: Arc<ProjectService<PR>>,
    /// Task CRUD service.
    pub task_service: Arc<TaskService<TR, PR>>,
    /// User CRUD service.
    pub user_service: Arc<UserService<UR>>,
}

impl<PR, TR, UR> Clone for AppState<PR, TR, UR> {
    fn clone(&self) -> Self {
        Self {
            project_service: Arc::clone(&self.project_service),
            task_service: Arc::clone(&self.task_service),
            user_service: Arc::clone(&self.user_service),
        }
    }
}

impl<PR, TR, UR> AppState<PR, TR, UR>
where
    PR: ProjectRepository + Send + Sync + 'static,
    TR: TaskRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        project_service: ProjectService<PR>,
        task_service: TaskService<TR, PR>,
        user_service: UserService<UR>,
    ) -> Self {
        Self {
            project_service: Arc::new(project_service),
            task_service: Arc::new(task_service),
            user_service: Arc::new(user_service),
        }
    }
}
