//! Project service: use-cases for managing projects.

use taskhub_domain::error::{NotFoundError, TaskHubError};
use taskhub_domain::id::ProjectId;
use taskhub_domain::project::{Project, ProjectChanges};

use crate::ports::ProjectRepository;

fn not_found(id: ProjectId) -> TaskHubError {
    NotFoundError {
        entity: "Project",
        id: id.to_string(),
    }
    .into()
}

/// Application service for project CRUD operations.
pub struct ProjectService<R> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new project after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, project), fields(project_name = %project.name))]
    pub async fn create_project(&self, project: Project) -> Result<Project, TaskHubError> {
        project.validate()?;
        self.repo.create(project).await
    }

    /// Look up a project by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when no project with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_project(&self, id: ProjectId) -> Result<Project, TaskHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// List all projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_projects(&self) -> Result<Vec<Project>, TaskHubError> {
        self.repo.get_all().await
    }

    /// Apply `changes` to the stored project and persist the result.
    ///
    /// Fields absent from `changes` keep their stored value; `created_at`
    /// never changes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when no project with `id` exists,
    /// [`TaskHubError::Validation`] if the result is invalid, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_project(
        &self,
        id: ProjectId,
        changes: ProjectChanges,
    ) -> Result<Project, TaskHubError> {
        let project = self.get_project(id).await?.apply(changes);
        project.validate()?;
        self.repo.update(project).await?.ok_or_else(|| not_found(id))
    }

    /// Delete a project together with all of its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::NotFound`] when no project with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_project(&self, id: ProjectId) -> Result<(), TaskHubError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}
