//! `SQLite` implementation of [`UserRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use taskhub_app::ports::UserRepository;
use taskhub_domain::error::{ConflictError, TaskHubError};
use taskhub_domain::id::UserId;
use taskhub_domain::user::User;

use crate::error::{StorageError, decode};

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<User> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let email: String = row.try_get("email")?;

        Ok(Self(User {
            id: UserId::from_str(&id).map_err(decode)?,
            name,
            email,
        }))
    }
}

const INSERT: &str = "INSERT INTO users (id, name, email) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM users ORDER BY rowid ASC";
// `email` is declared COLLATE NOCASE, so equality ignores ASCII case.
const SELECT_BY_EMAIL: &str = "SELECT * FROM users WHERE email = ?";
const UPDATE: &str = "UPDATE users SET name = ?, email = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM users WHERE id = ?";

/// Maps a `UNIQUE(email)` rejection to the conflict error the service
/// reports when it catches the duplicate itself.
fn map_write_error(err: sqlx::Error, email: &str) -> TaskHubError {
    let err = StorageError::from(err);
    if err.is_unique_violation() {
        ConflictError::DuplicateEmail(email.to_string()).into()
    } else {
        err.into()
    }
}

/// `SQLite`-backed user repository.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: User) -> Result<User, TaskHubError> {
        sqlx::query(INSERT)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .execute(&self.pool)
            .await
            .map_err(|err| map_write_error(err, &user.email))?;

        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, TaskHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<User>, TaskHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, TaskHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn update(&self, user: User) -> Result<Option<User>, TaskHubError> {
        let result = sqlx::query(UPDATE)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|err| map_write_error(err, &user.email))?;

        Ok((result.rows_affected() > 0).then_some(user))
    }

    async fn delete(&self, id: UserId) -> Result<bool, TaskHubError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
