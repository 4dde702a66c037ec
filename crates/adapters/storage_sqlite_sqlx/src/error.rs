//! Storage-specific error type wrapping sqlx errors.

use taskhub_domain::error::TaskHubError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StorageError {
    /// Whether the database rejected a write because of a `UNIQUE` constraint.
    pub(crate) fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(err) => err
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation()),
            Self::Migration(_) => false,
        }
    }

    /// Whether the database rejected a write because of a `FOREIGN KEY` constraint.
    pub(crate) fn is_foreign_key_violation(&self) -> bool {
        match self {
            Self::Database(err) => err
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation()),
            Self::Migration(_) => false,
        }
    }
}

impl From<StorageError> for TaskHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Wrap a column decoding failure the way sqlx expects it.
pub(crate) fn decode<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}
