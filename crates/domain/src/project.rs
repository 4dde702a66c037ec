//! Project: a named container that owns zero or more tasks.

use serde::{Deserialize, Serialize};

use crate::error::{TaskHubError, ValidationError};
use crate::id::ProjectId;
use crate::time::{Timestamp, now};

/// A project groups tasks. Deleting a project deletes its tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    /// Assigned by the server when the project is built.
    pub created_at: Timestamp,
}

impl Project {
    /// Create a builder for constructing a [`Project`].
    #[must_use]
    pub fn builder() -> ProjectBuilder {
        ProjectBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), TaskHubError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Apply a partial update, leaving absent fields untouched.
    ///
    /// A blank `description` clears the stored one. The result is not
    /// validated; callers run [`Project::validate`] before persisting it.
    #[must_use]
    pub fn apply(mut self, changes: ProjectChanges) -> Self {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = (!description.trim().is_empty()).then_some(description);
        }
        self
    }
}

/// Fields a client may change on an existing [`Project`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Step-by-step builder for [`Project`].
#[derive(Debug, Default)]
pub struct ProjectBuilder {
    id: Option<ProjectId>,
    name: Option<String>,
    description: Option<String>,
    created_at: Option<Timestamp>,
}

impl ProjectBuilder {
    #[must_use]
    pub fn id(mut self, id: ProjectId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return a [`Project`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Project, TaskHubError> {
        let project = Project {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description,
            created_at: self.created_at.unwrap_or_else(now),
        };
        project.validate()?;
        Ok(project)
    }
}
