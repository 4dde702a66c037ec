//! # taskhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON REST API** for projects, tasks and users under a
//!   configurable path prefix (`/api/rust/projects`, `/api/rust/tasks`, …)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!   (200/201 on success, 400 validation, 404 missing, 405 wrong method,
//!   409 duplicate e-mail, 500 storage)
//! - Answer CORS preflights permissively and force a JSON content type on
//!   every response
//!
//! ## Dependency rule
//! Depends on `taskhub-app` (for port traits and services) and `taskhub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
