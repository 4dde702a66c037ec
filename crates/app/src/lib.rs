//! # taskhub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ProjectRepository`: CRUD for projects
//!   - `TaskRepository`: CRUD for tasks, lookup by owning project
//!   - `UserRepository`: CRUD for users, lookup by e-mail
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ProjectService`, `TaskService`, `UserService`
//! - Enforce the invariants that need storage (task → project reference,
//!   unique user e-mail) without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `taskhub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
