//! Storage port: repository traits for persistence.

use std::future::Future;

use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::{ProjectId, TaskId, UserId};
use taskhub_domain::project::Project;
use taskhub_domain::task::Task;
use taskhub_domain::user::User;

/// Repository for persisting and querying [`Project`]s.
pub trait ProjectRepository {
    /// Insert a new project.
    fn create(&self, project: Project)
    -> impl Future<Output = Result<Project, TaskHubError>> + Send;

    /// Get a project by its unique identifier.
    fn get_by_id(
        &self,
        id: ProjectId,
    ) -> impl Future<Output = Result<Option<Project>, TaskHubError>> + Send;

    /// Get all projects, newest first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Project>, TaskHubError>> + Send;

    /// Whether a project with `id` exists.
    fn exists(&self, id: ProjectId) -> impl Future<Output = Result<bool, TaskHubError>> + Send;

    /// Overwrite the stored row with `project`.
    ///
    /// Returns `None` when no row with `project.id` exists.
    fn update(
        &self,
        project: Project,
    ) -> impl Future<Output = Result<Option<Project>, TaskHubError>> + Send;

    /// Delete a project and, through the foreign key, all of its tasks.
    ///
    /// Returns `false` when nothing was deleted.
    fn delete(&self, id: ProjectId) -> impl Future<Output = Result<bool, TaskHubError>> + Send;
}

/// Repository for persisting and querying [`Task`]s.
pub trait TaskRepository {
    /// Insert a new task. The owning project must already exist.
    fn create(&self, task: Task) -> impl Future<Output = Result<Task, TaskHubError>> + Send;

    /// Get a task by its unique identifier.
    fn get_by_id(
        &self,
        id: TaskId,
    ) -> impl Future<Output = Result<Option<Task>, TaskHubError>> + Send;

    /// Get all tasks ordered by due date, earliest first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Task>, TaskHubError>> + Send;

    /// Get the tasks of one project ordered by due date, earliest first.
    fn find_by_project(
        &self,
        project_id: ProjectId,
    ) -> impl Future<Output = Result<Vec<Task>, TaskHubError>> + Send;

    /// Overwrite the stored row with `task`.
    ///
    /// Returns `None` when no row with `task.id` exists.
    fn update(&self, task: Task)
    -> impl Future<Output = Result<Option<Task>, TaskHubError>> + Send;

    /// Delete a task. Returns `false` when nothing was deleted.
    fn delete(&self, id: TaskId) -> impl Future<Output = Result<bool, TaskHubError>> + Send;
}

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    /// Insert a new user.
    fn create(&self, user: User) -> impl Future<Output = Result<User, TaskHubError>> + Send;

    /// Get a user by its unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, TaskHubError>> + Send;

    /// Get all users in insertion order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, TaskHubError>> + Send;

    /// Find a user by e-mail, ignoring ASCII case.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, TaskHubError>> + Send;

    /// Overwrite the stored row with `user`.
    ///
    /// Returns `None` when no row with `user.id` exists.
    fn update(&self, user: User)
    -> impl Future<Output = Result<Option<User>, TaskHubError>> + Send;

    /// Delete a user. Returns `false` when nothing was deleted.
    fn delete(&self, id: UserId) -> impl Future<Output = Result<bool, TaskHubError>> + Send;
}
