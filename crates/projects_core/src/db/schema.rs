//! Embedded project schema.
//!
//! # Invariants
//! - `PRAGMA user_version` is `0` before bootstrap and `SCHEMA_VERSION` after.
//! - Databases written by a newer build are refused, never downgraded.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Schema version written by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const PROJECT_SCHEMA_SQL: &str = include_str!("project_schema.sql");

/// Creates the project table on a fresh database; no-op when already current.
pub fn apply_schema(conn: &mut Connection) -> DbResult<()> {
    match user_version(conn)? {
        SCHEMA_VERSION => Ok(()),
        0 => {
            let tx = conn.transaction()?;
            tx.execute_batch(PROJECT_SCHEMA_SQL)?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            tx.commit()?;
            Ok(())
        }
        db_version => Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: SCHEMA_VERSION,
        }),
    }
}

/// Fails unless the connection carries the current schema.
pub fn ensure_schema_ready(conn: &Connection) -> DbResult<()> {
    let db_version = user_version(conn)?;
    if db_version != SCHEMA_VERSION {
        return Err(DbError::SchemaNotApplied {
            db_version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(())
}

fn user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}
