//! # taskhub-domain
//!
//! Pure domain model for the taskhub project tracker.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Projects** (named containers created at a point in time)
//! - Define **Tasks** (dated units of work owned by exactly one project)
//! - Define **Users** (standalone name + e-mail records)
//! - Contain all invariant enforcement that does not need storage
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod project;
pub mod task;
pub mod user;
