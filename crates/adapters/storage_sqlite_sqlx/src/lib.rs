//! # taskhub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `taskhub-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle (foreign keys enabled so that
//!   deleting a project cascades to its tasks)
//! - Run the embedded `CREATE TABLE IF NOT EXISTS` migrations
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `taskhub-app` (for port traits) and `taskhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod pool;
mod project_repo;
mod task_repo;
mod user_repo;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use project_repo::SqliteProjectRepository;
pub use task_repo::SqliteTaskRepository;
pub use user_repo::SqliteUserRepository;
