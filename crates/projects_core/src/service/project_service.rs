//! Project use-case service.
//!
//! # Responsibility
//! - Provide the store operations the console dispatches to.
//! - Return committed state (read-back) after creation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Store errors are surfaced unchanged.
//! - Logged events carry ids and statuses only, never record content.

use crate::model::project::{Project, ProjectId};
use crate::repo::project_repo::{ProjectRepository, RepoError, RepoResult};
use log::{info, warn};

/// Use-case service wrapper for project CRUD operations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new project and returns the committed record.
    ///
    /// # Contract
    /// - Any `id` on the input is ignored; the store assigns one.
    /// - The returned record is read back from the store.
    pub fn add_project(&self, project: &Project) -> RepoResult<Project> {
        let id = self
            .repo
            .add_project(project)
            .inspect_err(|err| log_failure("project_add", err))?;
        info!("event=project_add module=service status=ok project_id={id}");

        self.repo.fetch_project_by_id(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("created project {id} not found in read-back"))
        })
    }

    /// Lists all projects in store-defined order.
    pub fn fetch_all_projects(&self) -> RepoResult<Vec<Project>> {
        self.repo.fetch_all_projects()
    }

    /// Gets one project by id; `None` when it does not exist.
    pub fn fetch_project_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.repo.fetch_project_by_id(id)
    }

    /// Replaces every field of the project identified by `project.id`.
    pub fn modify_project_details(&self, project: &Project) -> RepoResult<()> {
        self.repo
            .modify_project_details(project)
            .inspect_err(|err| log_failure("project_modify", err))?;
        info!(
            "event=project_modify module=service status=ok project_id={}",
            project.id.unwrap_or_default()
        );
        Ok(())
    }

    /// Deletes a project by id.
    pub fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        self.repo
            .delete_project(id)
            .inspect_err(|err| log_failure("project_delete", err))?;
        info!("event=project_delete module=service status=ok project_id={id}");
        Ok(())
    }
}

fn log_failure(event: &str, err: &RepoError) {
    let error_code = match err {
        RepoError::Validation(_) => "validation_failed",
        RepoError::Db(_) => "db_error",
        RepoError::NotFound(_) => "not_found",
        RepoError::MissingId => "missing_id",
        RepoError::InvalidData(_) => "invalid_data",
    };
    warn!("event={event} module=service status=error error_code={error_code}");
}
