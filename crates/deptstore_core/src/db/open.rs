//! Connection opening for file and in-memory SQLite databases.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Opens (or creates) a SQLite database file.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_logged("file", &path.display().to_string(), || {
        Connection::open(path)
    })
}

/// Opens a private in-memory SQLite database.
///
/// The database disappears when the returned connection is dropped.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_logged("memory", ":memory:", Connection::open_in_memory)
}

fn open_logged<F>(mode: &str, target: &str, opener: F) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    match opener() {
        Ok(conn) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(DbError::Open {
                target: target.to_string(),
                source: err,
            })
        }
    }
}
