//! Registry schema history.
//!
//! Each step is an embedded SQL script tagged with the `user_version` it
//! leaves behind. Pending steps run in one transaction, so a failed step
//! leaves the previous version in place.

use super::{DbError, DbResult, REGISTRY_TABLES};
use log::info;
use rusqlite::Connection;

struct Step {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[Step] = &[Step {
    version: 1,
    name: "registry_tables",
    sql: include_str!("0001_init.sql"),
}];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Reads the version recorded in the store.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}

/// Brings the store up to [`latest_version`] and checks the registry tables.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let mut pending = STEPS.iter().filter(|step| step.version > found).peekable();
    if pending.peek().is_some() {
        let tx = conn.transaction()?;
        for step in pending {
            tx.execute_batch(step.sql)?;
            tx.pragma_update(None, "user_version", step.version)?;
            info!(
                "event=db_migrate module=db status=ok version={} name={}",
                step.version, step.name
            );
        }
        tx.commit()?;
    }

    verify_registry_tables(conn)
}

/// Fails with [`DbError::MissingTable`] for the first absent registry table.
pub fn verify_registry_tables(conn: &Connection) -> DbResult<()> {
    let mut stmt = conn.prepare_cached(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
    )?;
    for table in REGISTRY_TABLES {
        let present: bool = stmt.query_row([table], |row| row.get(0))?;
        if !present {
            return Err(DbError::MissingTable(table));
        }
    }
    Ok(())
}
