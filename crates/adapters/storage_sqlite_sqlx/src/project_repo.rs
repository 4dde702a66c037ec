//! `SQLite` implementation of [`ProjectRepository`].

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use taskhub_app::ports::ProjectRepository;
use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::ProjectId;
use taskhub_domain::project::Project;
use taskhub_domain::time::Timestamp;

use crate::error::{StorageError, decode};

/// Wrapper for converting database rows into domain [`Project`].
struct Wrapper(Project);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Project> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let description: Option<String> = row.try_get("description")?;
        let created_at: String = row.try_get("created_at")?;

        let id = ProjectId::from_str(&id).map_err(decode)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(decode)?
            .to_utc();

        Ok(Self(Project {
            id,
            name,
            description,
            created_at,
        }))
    }
}

/// Fixed-width RFC 3339 so that text ordering matches chronological ordering.
fn format_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

const INSERT: &str =
    "INSERT INTO projects (id, name, description, created_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM projects WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM projects ORDER BY created_at DESC, rowid DESC";
const EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?)";
const UPDATE: &str = "UPDATE projects SET name = ?, description = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM projects WHERE id = ?";

/// `SQLite`-backed project repository.
#[derive(Clone)]
pub struct SqliteProjectRepository {
    pool: SqlitePool,
}

impl SqliteProjectRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ProjectRepository for SqliteProjectRepository {
    async fn create(&self, project: Project) -> Result<Project, TaskHubError> {
        sqlx::query(INSERT)
            .bind(project.id.to_string())
            .bind(&project.name)
            .bind(project.description.as_deref())
            .bind(format_timestamp(project.created_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(project)
    }

    async fn get_by_id(&self, id: ProjectId) -> Result<Option<Project>, TaskHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Project>, TaskHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn exists(&self, id: ProjectId) -> Result<bool, TaskHubError> {
        let (exists,): (i64,) = sqlx::query_as(EXISTS)
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(exists != 0)
    }

    async fn update(&self, project: Project) -> Result<Option<Project>, TaskHubError> {
        let result = sqlx::query(UPDATE)
            .bind(&project.name)
            .bind(project.description.as_deref())
            .bind(project.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok((result.rows_affected() > 0).then_some(project))
    }

    async fn delete(&self, id: ProjectId) -> Result<bool, TaskHubError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteProjectRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteProjectRepository::new(db.pool().clone())
    }

    fn test_project() -> Project {
        Project::builder()
            .name("Website")
            .description("public site")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_project_with_same_fields() {
        let repo = setup().await;
        let project = test_project();
        let id = project.id;

        repo.create(project.clone()).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.id, project.id);
        assert_eq!(fetched.name, project.name);
        assert_eq!(fetched.description, project.description);
        assert_eq!(
            fetched.created_at.timestamp_micros(),
            project.created_at.timestamp_micros()
        );
    }

    #[tokio::test]
    async fn should_store_missing_description_as_null() {
        let repo = setup().await;
        let project = Project::builder().name("Bare").build().unwrap();
        let id = project.id;
        repo.create(project).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert!(fetched.description.is_none());
    }

    #[tokio::test]
    async fn should_return_none_when_project_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(ProjectId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_newest_project_first() {
        let repo = setup().await;
        let older = Project::builder()
            .name("Older")
            .created_at(DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap().to_utc())
            .build()
            .unwrap();
        let newer = Project::builder()
            .name("Newer")
            .created_at(DateTime::parse_from_rfc3339("2024-06-01T00:00:00Z").unwrap().to_utc())
            .build()
            .unwrap();
        repo.create(older).await.unwrap();
        repo.create(newer).await.unwrap();

        let names: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn should_report_existence() {
        let repo = setup().await;
        let project = test_project();
        let id = project.id;

        assert!(!repo.exists(id).await.unwrap());
        repo.create(project).await.unwrap();
        assert!(repo.exists(id).await.unwrap());
    }

    #[tokio::test]
    async fn should_update_project_when_exists() {
        let repo = setup().await;
        let mut project = test_project();
        let id = project.id;
        repo.create(project.clone()).await.unwrap();

        project.name = "Intranet".to_string();
        let saved = repo.update(project).await.unwrap();
        assert!(saved.is_some());

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Intranet");
    }

    #[tokio::test]
    async fn should_return_none_when_updating_missing_project() {
        let repo = setup().await;
        let saved = repo.update(test_project()).await.unwrap();
        assert!(saved.is_none());
    }

    #[tokio::test]
    async fn should_delete_project_once() {
        let repo = setup().await;
        let project = test_project();
        let id = project.id;
        repo.create(project).await.unwrap();

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }
}
