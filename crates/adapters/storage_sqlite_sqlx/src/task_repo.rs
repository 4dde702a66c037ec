//! `SQLite` implementation of [`TaskRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use taskhub_app::ports::TaskRepository;
use taskhub_domain::error::{TaskHubError, ValidationError};
use taskhub_domain::id::{ProjectId, TaskId};
use taskhub_domain::task::{Task, TaskStatus};
use taskhub_domain::time::Date;

use crate::error::{StorageError, decode};

/// Wrapper for converting database rows into domain [`Task`].
struct Wrapper(Task);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Task> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let description: String = row.try_get("description")?;
        let status: String = row.try_get("status")?;
        let due_date: String = row.try_get("due_date")?;
        let project_id: String = row.try_get("project_id")?;

        Ok(Self(Task {
            id: TaskId::from_str(&id).map_err(decode)?,
            description,
            status: TaskStatus::from_str(&status).map_err(decode)?,
            due_date: Date::from_str(&due_date).map_err(decode)?,
            project_id: ProjectId::from_str(&project_id).map_err(decode)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO tasks (id, description, status, due_date, project_id)
    VALUES (?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM tasks WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM tasks ORDER BY due_date ASC, rowid ASC";
const SELECT_BY_PROJECT: &str =
    "SELECT * FROM tasks WHERE project_id = ? ORDER BY due_date ASC, rowid ASC";
const UPDATE: &str = r"
    UPDATE tasks
    SET description = ?, status = ?, due_date = ?, project_id = ?
    WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM tasks WHERE id = ?";

/// Maps a foreign-key rejection (project deleted between the existence
/// check and the write) to the same error the service reports up front.
fn map_write_error(err: sqlx::Error, project_id: ProjectId) -> TaskHubError {
    let err = StorageError::from(err);
    if err.is_foreign_key_violation() {
        ValidationError::UnknownProject(project_id).into()
    } else {
        err.into()
    }
}

/// `SQLite`-backed task repository.
#[derive(Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, TaskHubError> {
        sqlx::query(INSERT)
            .bind(task.id.to_string())
            .bind(&task.description)
            .bind(task.status.as_str())
            .bind(task.due_date.to_string())
            .bind(task.project_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|err| map_write_error(err, task.project_id))?;

        Ok(task)
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Task>, TaskHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_project(&self, project_id: ProjectId) -> Result<Vec<Task>, TaskHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_PROJECT)
            .bind(project_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, task: Task) -> Result<Option<Task>, TaskHubError> {
        let result = sqlx::query(UPDATE)
            .bind(&task.description)
            .bind(task.status.as_str())
            .bind(task.due_date.to_string())
            .bind(task.project_id.to_string())
            .bind(task.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|err| map_write_error(err, task.project_id))?;

        Ok((result.rows_affected() > 0).then_some(task))
    }

    async fn delete(&self, id: TaskId) -> Result<bool, TaskHubError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
