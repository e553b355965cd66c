//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define typed CRUD contracts per registry entity.
//! - Isolate SQLite query details from service orchestration.
//! - Translate SQLite constraint failures into semantic errors.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - Every write runs inside one immediate transaction.
//! - Update/delete on a missing id returns `RepoError::NotFound`.

pub mod department_repo;
pub mod doctor_repo;
pub mod hospital_repo;

use crate::db::migrations::{latest_version, schema_version, verify_registry_tables};
use crate::db::DbError;
use crate::model::{EntityKind, ValidationError};
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all registry entities.
#[derive(Debug)]
pub enum RepoError {
    /// Caller input rejected before or by storage constraints.
    Validation(ValidationError),
    /// Target row does not exist.
    NotFound { entity: EntityKind, id: i64 },
    /// Store-level constraint failure with no caller-facing mapping.
    Integrity(String),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Integrity(message) => write!(f, "integrity violation: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Integrity(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
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

/// Constraint family reported by SQLite for a failed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Constraint {
    /// `UNIQUE constraint failed: <table>.<column>`; holds `<table>.<column>`.
    Unique(String),
    ForeignKey,
    Other,
}

/// Classifies a constraint violation, or `None` for other SQLite errors.
pub(crate) fn constraint_violation(err: &rusqlite::Error) -> Option<Constraint> {
    let rusqlite::Error::SqliteFailure(failure, message) = err else {
        return None;
    };
    if failure.code != ErrorCode::ConstraintViolation {
        return None;
    }

    match failure.extended_code {
        rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            let column = message
                .as_deref()
                .and_then(|text| text.split_once(':'))
                .map(|(_, columns)| columns.trim().to_string())
                .unwrap_or_default();
            Some(Constraint::Unique(column))
        }
        rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(Constraint::ForeignKey),
        _ => Some(Constraint::Other),
    }
}

/// Maps failures of cascading deletes; any constraint hit here is store-level.
pub(crate) fn map_cascade_error(err: rusqlite::Error) -> RepoError {
    match constraint_violation(&err) {
        Some(_) => RepoError::Integrity(err.to_string()),
        None => err.into(),
    }
}

/// Rejects connections that skipped store bootstrap.
pub(crate) fn ensure_connection_ready(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let expected = latest_version();
    let actual = schema_version(conn)?;
    if actual != expected {
        return Err(RepoError::InvalidData(format!(
            "`{table}` repository needs schema v{expected}, store is at v{actual}"
        )));
    }

    let foreign_keys: bool = conn.pragma_query_value(None, "foreign_keys", |row| row.get(0))?;
    if !foreign_keys {
        return Err(RepoError::InvalidData(format!(
            "`{table}` repository needs PRAGMA foreign_keys = ON"
        )));
    }

    verify_registry_tables(conn).map_err(|err| RepoError::InvalidData(err.to_string()))
}

/// Returns whether a row with `id` exists in `table`.
pub(crate) fn row_exists(conn: &Connection, table: &'static str, id: i64) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::{constraint_violation, Constraint};
    use rusqlite::Connection;

    #[test]
    fn unique_violation_reports_table_and_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT UNIQUE);
             INSERT INTO t (name) VALUES ('a');",
        )
        .unwrap();

        let err = conn
            .execute("INSERT INTO t (name) VALUES ('a');", [])
            .unwrap_err();
        assert_eq!(
            constraint_violation(&err),
            Some(Constraint::Unique("t.name".to_string()))
        );
    }

    #[test]
    fn foreign_key_violation_is_classified() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE p (id INTEGER PRIMARY KEY);
             CREATE TABLE c (id INTEGER PRIMARY KEY, p_id INTEGER REFERENCES p(id));",
        )
        .unwrap();

        let err = conn
            .execute("INSERT INTO c (p_id) VALUES (42);", [])
            .unwrap_err();
        assert_eq!(constraint_violation(&err), Some(Constraint::ForeignKey));
    }

    #[test]
    fn non_constraint_errors_are_ignored() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.execute("SELECT * FROM missing;", []).unwrap_err();
        assert_eq!(constraint_violation(&err), None);
    }
}
