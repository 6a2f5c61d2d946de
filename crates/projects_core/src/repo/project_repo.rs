//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the five store operations over the `project` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Project::validate()` before SQL mutations.
//! - Read paths reject malformed persisted rows instead of masking them.
//! - `modify_project_details` is a full replace keyed by id.

use crate::db::schema::ensure_schema_ready;
use crate::db::DbError;
use crate::model::project::{Hours, Project, ProjectId, ProjectValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROJECT_SELECT_SQL: &str = "SELECT
    project_id,
    project_name,
    estimated_hours,
    actual_hours,
    difficulty,
    notes
FROM project";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error for project persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ProjectValidationError),
    Db(DbError),
    NotFound(ProjectId),
    /// Update was requested for a record that was never persisted.
    MissingId,
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "project with ID={id} does not exist"),
            Self::MissingId => write!(f, "project has no ID"),
            Self::InvalidData(message) => write!(f, "invalid persisted project data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::MissingId | Self::InvalidData(_) => None,
        }
    }
}

impl From<ProjectValidationError> for RepoError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store contract for project CRUD operations.
///
/// Implementations assign ids on `add_project`; callers never supply one.
pub trait ProjectRepository {
    fn add_project(&self, project: &Project) -> RepoResult<ProjectId>;
    fn fetch_all_projects(&self) -> RepoResult<Vec<Project>>;
    fn fetch_project_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn modify_project_details(&self, project: &Project) -> RepoResult<()>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<()>;
}

impl<T: ProjectRepository + ?Sized> ProjectRepository for &T {
    fn add_project(&self, project: &Project) -> RepoResult<ProjectId> {
        (**self).add_project(project)
    }

    fn fetch_all_projects(&self) -> RepoResult<Vec<Project>> {
        (**self).fetch_all_projects()
    }

    fn fetch_project_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        (**self).fetch_project_by_id(id)
    }

    fn modify_project_details(&self, project: &Project) -> RepoResult<()> {
        (**self).modify_project_details(project)
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        (**self).delete_project(id)
    }
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Wraps a connection whose schema has been fully applied.
    ///
    /// # Errors
    /// - `RepoError::Db(DbError::SchemaNotApplied)` for unprepared connections.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn add_project(&self, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;

        self.conn.execute(
            "INSERT INTO project (
                project_name,
                estimated_hours,
                actual_hours,
                difficulty,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                project.name.as_deref(),
                project.estimated_hours.map(String::from),
                project.actual_hours.map(String::from),
                project.difficulty,
                project.notes.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn fetch_all_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} ORDER BY project_name ASC, project_id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();

        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn fetch_project_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE project_id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn modify_project_details(&self, project: &Project) -> RepoResult<()> {
        let id = project.id.ok_or(RepoError::MissingId)?;
        project.validate()?;

        let changed = self.conn.execute(
            "UPDATE project
             SET
                project_name = ?1,
                estimated_hours = ?2,
                actual_hours = ?3,
                difficulty = ?4,
                notes = ?5
             WHERE project_id = ?6;",
            params![
                project.name.as_deref(),
                project.estimated_hours.map(String::from),
                project.actual_hours.map(String::from),
                project.difficulty,
                project.notes.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM project WHERE project_id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let project = Project {
        id: Some(row.get("project_id")?),
        name: row.get("project_name")?,
        estimated_hours: parse_hours_column(row, "estimated_hours")?,
        actual_hours: parse_hours_column(row, "actual_hours")?,
        difficulty: row.get("difficulty")?,
        notes: row.get("notes")?,
    };
    project.validate()?;
    Ok(project)
}

fn parse_hours_column(row: &Row<'_>, column: &str) -> RepoResult<Option<Hours>> {
    match row.get::<_, Option<String>>(column)? {
        Some(text) => text.parse::<Hours>().map(Some).map_err(|_| {
            RepoError::InvalidData(format!("invalid hours value `{text}` in project.{column}"))
        }),
        None => Ok(None),
    }
}
