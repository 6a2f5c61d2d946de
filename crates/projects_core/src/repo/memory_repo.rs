//! In-memory project repository.
//!
//! # Responsibility
//! - Provide a storage-free `ProjectRepository` for tests and scratch sessions.
//!
//! # Invariants
//! - Ids start at 1 and are never reused, even after deletes.
//! - `fetch_all_projects` returns records in insertion order.
//! - Validation and not-found semantics match `SqliteProjectRepository`.

use crate::model::project::{Project, ProjectId};
use crate::repo::project_repo::{ProjectRepository, RepoError, RepoResult};
use std::cell::{Cell, RefCell};

/// Single-threaded in-memory store.
#[derive(Debug)]
pub struct InMemoryProjectRepository {
    rows: RefCell<Vec<Project>>,
    next_id: Cell<ProjectId>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self {
            rows: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Number of stored projects.
    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }
}

impl Default for InMemoryProjectRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn add_project(&self, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.rows.borrow_mut().push(project.clone().with_id(id));
        Ok(id)
    }

    fn fetch_all_projects(&self) -> RepoResult<Vec<Project>> {
        Ok(self.rows.borrow().clone())
    }

    fn fetch_project_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .find(|project| project.id == Some(id))
            .cloned())
    }

    fn modify_project_details(&self, project: &Project) -> RepoResult<()> {
        let id = project.id.ok_or(RepoError::MissingId)?;
        project.validate()?;

        let mut rows = self.rows.borrow_mut();
        let slot = rows
            .iter_mut()
            .find(|stored| stored.id == Some(id))
            .ok_or(RepoError::NotFound(id))?;
        *slot = project.clone();
        Ok(())
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        let mut rows = self.rows.borrow_mut();
        let position = rows
            .iter()
            .position(|stored| stored.id == Some(id))
            .ok_or(RepoError::NotFound(id))?;
        rows.remove(position);
        Ok(())
    }
}
