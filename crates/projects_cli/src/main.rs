//! Interactive project tracker entry point.
//!
//! # Responsibility
//! - Resolve configuration from the working directory and start file logging.
//! - Open the SQLite store and run the console over stdin/stdout.

use log::{error, info};
use projects_core::db::open_db;
use projects_core::{
    core_version, init_logging, logging_status, AppConfig, ProjectService, ProjectsConsole,
    SqliteProjectRepository,
};
use std::error::Error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("projects: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::for_dir(std::env::current_dir()?);

    // The console stays usable without file logs.
    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("projects: logging disabled: {err}");
    }
    if let Some((level, log_dir)) = logging_status() {
        info!(
            "event=app_start module=cli status=ok version={} level={level} log_dir={}",
            core_version(),
            log_dir.display()
        );
    }

    let conn = open_db(&config.db_path)?;
    let repo = SqliteProjectRepository::try_new(&conn)?;
    let mut console =
        ProjectsConsole::new(ProjectService::new(repo), io::stdin().lock(), io::stdout());

    console.run()?;
    info!("event=app_exit module=cli status=ok");
    Ok(())
}
