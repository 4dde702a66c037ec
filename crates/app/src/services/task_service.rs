//! Task service: use-cases for managing tasks.
//!
//! Tasks reference a project, so the service holds both the task repository
//! and the project repository and refuses to store a task whose project does
//! not exist.

use taskhub_domain::error::{NotFoundError, TaskHubError, ValidationError};
use taskhub_domain::id::{ProjectId, TaskId};
use taskhub_domain::task::{Task, TaskChanges};

use crate::ports::{ProjectRepository, TaskRepository};

fn not_found(id: TaskId) -> TaskHubError {
    NotFoundError {
        entity: "Task",
        id: id.to_string(),
    }
    .into()
}

/// Application service for task CRUD operations.
pub struct TaskService<T, P> {
    tasks: T,
    projects: P,
}

impl<T, P> TaskService<T, P>
where
    T: TaskRepository,
    P: ProjectRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(tasks: T, projects: P) -> Self {
        Self { tasks, projects }
    }

    async fn ensure_project(&self, project_id: ProjectId) -> Result<(), TaskHubError> {
        if self.projects.exists(project_id).await? {
            Ok(())
        } else {
            tracing::debug!(%project_id, "task references unknown project");
            Err(ValidationError::UnknownProject(project_id).into())
        }
    }

    /// Create a new task after validating it and checking its project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] if invariants fail or the project
    /// does not exist, or a storage error propagated from the repository.
    #[tracing::instrument(skip(self, task), fields(project_id = %task.project_id))]
    pub async fn create_task(&self, task: Task) -> Result<Task, TaskHubError> {
        task.validate()?;
        self.ensure_project(task.project_id).await?;
        self.tasks.create(task).await
    }

    /// Look up a task by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when no task with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_task(&self, id: TaskId) -> Result<Task, TaskHubError> {
        self.tasks.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// List all tasks, earliest due date first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, TaskHubError> {
        self.tasks.get_all().await
    }

    /// List the tasks of one project, earliest due date first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when the project does not exist,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_tasks_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<Task>, TaskHubError> {
        if !self.projects.exists(project_id).await? {
            return Err(NotFoundError {
                entity: "Project",
                id: project_id.to_string(),
            }
            .into());
        }
        self.tasks.find_by_project(project_id).await
    }

    /// Apply `changes` to the stored task and persist the result.
    ///
    /// Moving a task to another project requires that project to exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when no task with `id` exists,
    /// [`TaskHubError::Validation`] if the result is invalid, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_task(
        &self,
        id: TaskId,
        changes: TaskChanges,
    ) -> Result<Task, TaskHubError> {
        let moves_project = changes.project_id;
        let task = self.get_task(id).await?.apply(changes);
        task.validate()?;
        if let Some(project_id) = moves_project {
            self.ensure_project(project_id).await?;
        }
        self.tasks.update(task).await?.ok_or_else(|| not_found(id))
    }

    /// Delete a task by id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when no task with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: TaskId) -> Result<(), TaskHubError> {
        if self.tasks.delete(id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}
