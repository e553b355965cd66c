//! Registry store: connection setup, pooling and schema versioning.
//!
//! # Invariants
//! - Every connection handed out has `foreign_keys=ON`, otherwise cascades
//!   from hospitals to departments to doctors silently stop working.
//! - Schema version lives in `PRAGMA user_version`; a store written by a newer
//!   binary is refused rather than downgraded.
//! - After bootstrap all of [`REGISTRY_TABLES`] exist.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod pool;

pub use open::{open_db, open_db_in_memory};
pub use pool::{open_pool, DbPool, PooledConn};

/// Tables the registry cannot run without, parents first.
pub const REGISTRY_TABLES: [&str; 3] = ["hospitals", "departments", "doctors"];

/// Path literal selecting a private in-memory store.
pub const IN_MEMORY_PATH: &str = ":memory:";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// No pooled connection could be opened or checked out.
    Pool(r2d2::Error),
    /// The store was migrated by a newer build of the registry.
    SchemaTooNew { found: u32, supported: u32 },
    /// Migrations ran but a registry table is still absent.
    MissingTable(&'static str),
}

impl DbError {
    /// Stable code used in `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Pool(_) => "pool_unavailable",
            Self::SchemaTooNew { .. } => "schema_too_new",
            Self::MissingTable(_) => "schema_incomplete",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::Pool(err) => write!(f, "registry connection pool: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "registry schema v{found} is newer than this build understands (v{supported})"
            ),
            Self::MissingTable(table) => write!(f, "registry table `{table}` is missing"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Pool(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::MissingTable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<r2d2::Error> for DbError {
    fn from(value: r2d2::Error) -> Self {
        Self::Pool(value)
    }
}
