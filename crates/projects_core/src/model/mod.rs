//! Domain model for project records.
//!
//! # Responsibility
//! - Define the canonical project record passed across the store boundary.
//! - Provide the exact two-digit `Hours` value used for time estimates.
//!
//! # Invariants
//! - Every persisted project is identified by a store-assigned `ProjectId`.
//! - Records are value snapshots; callers re-fetch to observe committed state.

pub mod project;
