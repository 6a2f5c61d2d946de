//! Runtime configuration for the console binary.
//!
//! The tool takes no flags, environment variables or config files. Every
//! setting is derived from the directory the process runs in.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "projects.db";
const LOG_DIR_NAME: &str = "logs";

/// Resolved locations and levels for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl AppConfig {
    /// Builds the configuration rooted at `dir`.
    pub fn for_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            db_path: dir.join(DB_FILE_NAME),
            log_dir: dir.join(LOG_DIR_NAME),
            log_level: default_log_level(),
        }
    }
}
