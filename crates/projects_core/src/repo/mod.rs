//! Repository layer contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the project store contract the service and console depend on.
//! - Isolate SQLite query details from orchestration code.
//!
//! # Invariants
//! - Repository writes must enforce `Project::validate()` before persistence.
//! - Update and delete of an unknown id return `RepoError::NotFound`.

pub mod memory_repo;
pub mod project_repo;
