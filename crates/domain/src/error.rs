//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`TaskHubError`] via `#[from]` or a `From` impl.

use crate::id::ProjectId;

/// Base error type returned by services and repository ports.
#[derive(Debug, thiserror::Error)]
pub enum TaskHubError {
    /// A domain invariant was violated by the caller's input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The write clashes with a record that already exists.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// The storage backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invariant violations detected before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("description must not be empty")]
    EmptyDescription,

    #[error("due date is required")]
    MissingDueDate,

    #[error("project is required")]
    MissingProject,

    #[error("project {0} does not exist")]
    UnknownProject(ProjectId),

    #[error("email must not be empty")]
    EmptyEmail,

    #[error("email {0:?} is not a valid address")]
    InvalidEmail(String),

    #[error("unknown task status {0:?}")]
    InvalidStatus(String),

    #[error("invalid identifier {0:?}")]
    InvalidId(String),
}

/// Uniqueness violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error("email {0:?} is already registered")]
    DuplicateEmail(String),
}

/// A lookup by id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (`"Project"`, `"Task"`, …).
    pub entity: &'static str,
    /// Identifier that was requested.
    pub id: String,
}
