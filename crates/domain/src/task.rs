//! Task: a dated unit of work owned by exactly one project.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{TaskHubError, ValidationError};
use crate::id::{ProjectId, TaskId};
use crate::time::Date;

/// Progress of a [`Task`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Wire and storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Parse a status supplied by a client, where a missing or blank value
    /// means "not provided".
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidStatus`] for any other unknown value.
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, ValidationError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }
}

fn deserialize_optional_status<'de, D>(deserializer: D) -> Result<Option<TaskStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    TaskStatus::parse_optional(raw.as_deref()).map_err(serde::de::Error::custom)
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// A unit of work with a due date, belonging to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: Date,
    pub project_id: ProjectId,
}

impl Task {
    /// Create a builder for constructing a [`Task`].
    #[must_use]
    pub fn builder() -> TaskBuilder {
        TaskBuilder::default()
    }

    /// Check invariants that do not need storage.
    ///
    /// Whether `project_id` points at an existing project is checked by the
    /// task service, not here.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] when `description` is blank.
    pub fn validate(&self) -> Result<(), TaskHubError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription.into());
        }
        Ok(())
    }

    /// Apply a partial update, leaving absent fields untouched.
    #[must_use]
    pub fn apply(mut self, changes: TaskChanges) -> Self {
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        if let Some(project_id) = changes.project_id {
            self.project_id = project_id;
        }
        self
    }
}

/// Fields a client may change on an existing [`Task`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskChanges {
    pub description: Option<String>,
    /// A blank string leaves the status unchanged.
    #[serde(default, deserialize_with = "deserialize_optional_status")]
    pub status: Option<TaskStatus>,
    pub due_date: Option<Date>,
    pub project_id: Option<ProjectId>,
}

/// Step-by-step builder for [`Task`].
#[derive(Debug, Default)]
pub struct TaskBuilder {
    id: Option<TaskId>,
    description: Option<String>,
    status: Option<TaskStatus>,
    due_date: Option<Date>,
    project_id: Option<ProjectId>,
}

impl TaskBuilder {
    #[must_use]
    pub fn id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn due_date(mut self, due_date: Date) -> Self {
        self.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn project_id(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Consume the builder, validate, and return a [`Task`].
    ///
    /// Status defaults to [`TaskStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] if the description is blank or
    /// the due date or project is missing.
    pub fn build(self) -> Result<Task, TaskHubError> {
        let description = self.description.unwrap_or_default();
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription.into());
        }
        let project_id = self.project_id.ok_or(ValidationError::MissingProject)?;
        let due_date = self.due_date.ok_or(ValidationError::MissingDueDate)?;

        let task = Task {
            id: self.id.unwrap_or_default(),
            description,
            status: self.status.unwrap_or_default(),
            due_date,
            project_id,
        };
        task.validate()?;
        Ok(task)
    }
}
