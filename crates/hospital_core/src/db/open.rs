//! Single-connection store bootstrap, used by tools and tests.

use super::migrations::apply_migrations;
use super::{DbError, DbResult, IN_MEMORY_PATH};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the registry at `path` (or `:memory:`) with migrations applied.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    if path.as_os_str() == IN_MEMORY_PATH {
        return open_db_in_memory();
    }
    bootstrap("file", || Connection::open(path))
}

/// Opens a private in-memory registry with migrations applied.
pub fn open_db_in_memory() -> DbResult<Connection> {
    bootstrap("memory", Connection::open_in_memory)
}

/// Per-connection settings; run for every fresh connection, pooled or not.
pub(super) fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)
}

fn bootstrap(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let opened = connect().map_err(DbError::from).and_then(|mut conn| {
        configure_connection(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(conn)
    });
    log_open(mode, started_at, opened.as_ref().err());
    opened
}

pub(super) fn log_open(mode: &str, started_at: Instant, failure: Option<&DbError>) {
    let duration_ms = started_at.elapsed().as_millis();
    match failure {
        None => info!("event=db_open module=db status=ok mode={mode} duration_ms={duration_ms}"),
        Some(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={duration_ms} error_code={} error={err}",
            err.code()
        ),
    }
}
