//! Core logic for the interactive project tracker.
//! This crate owns the project model, the store contract and the console loop.

pub mod config;
pub mod console;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::AppConfig;
pub use console::controller::{ConsoleError, Flow, MenuAction, ProjectsConsole};
pub use console::input::{
    parse_optional_decimal, parse_optional_integer, parse_optional_string, InputError,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{Hours, ParseHoursError, Project, ProjectId, ProjectValidationError};
pub use repo::memory_repo::InMemoryProjectRepository;
pub use repo::project_repo::{ProjectRepository, RepoError, RepoResult, SqliteProjectRepository};
pub use service::project_service::ProjectService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
