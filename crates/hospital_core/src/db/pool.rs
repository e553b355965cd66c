//! Pooled store access for the HTTP server.
//!
//! A file store gets up to `max_size` connections sharing the same file. An
//! in-memory store only exists as long as its one connection does, so the
//! pool is pinned to a single connection that is never recycled.

use super::migrations::apply_migrations;
use super::open::{configure_connection, log_open};
use super::{DbResult, IN_MEMORY_PATH};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds a connection pool over the registry at `path` and migrates it.
pub fn open_pool(path: impl AsRef<Path>, max_size: u32) -> DbResult<DbPool> {
    let path = path.as_ref();
    let started_at = Instant::now();
    let in_memory = path.as_os_str() == IN_MEMORY_PATH;
    let mode = if in_memory { "memory_pool" } else { "file_pool" };

    let built = build(path, max_size, in_memory);
    log_open(mode, started_at, built.as_ref().err());
    built
}

fn build(path: &Path, max_size: u32, in_memory: bool) -> DbResult<DbPool> {
    let manager = if in_memory {
        SqliteConnectionManager::memory()
    } else {
        SqliteConnectionManager::file(path)
    }
    .with_init(|conn: &mut Connection| configure_connection(conn));

    let builder = Pool::builder().connection_timeout(CHECKOUT_TIMEOUT);
    let builder = if in_memory {
        builder
            .max_size(1)
            .min_idle(Some(1))
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        builder.max_size(max_size.max(1))
    };
    let pool = builder.build(manager)?;

    let mut conn = pool.get()?;
    apply_migrations(&mut conn)?;
    drop(conn);

    Ok(pool)
}
