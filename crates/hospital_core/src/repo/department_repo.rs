//! Department repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide typed CRUD over the `departments` table.
//! - Reject dangling `hospital_id` references inside the write transaction.
//!
//! # Invariants
//! - Listing is ordered by `id ASC`.
//! - Deleting a department cascades to its doctors.

use super::{
    constraint_violation, ensure_connection_ready, map_cascade_error, row_exists, Constraint,
    RepoError, RepoResult,
};
use crate::model::department::{Department, DepartmentId, NewDepartment};
use crate::model::{EntityKind, ValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const DEPARTMENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    hospital_id
FROM departments";

/// Repository interface for department CRUD operations.
pub trait DepartmentRepository {
    fn create_department(&self, draft: &NewDepartment) -> RepoResult<Department>;
    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>>;
    fn list_departments(&self) -> RepoResult<Vec<Department>>;
    fn update_department(&self, id: DepartmentId, draft: &NewDepartment)
        -> RepoResult<Department>;
    /// Deletes a department with its doctors; returns the removed row.
    fn delete_department(&self, id: DepartmentId) -> RepoResult<Department>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "departments")?;
        Ok(Self { conn })
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn create_department(&self, draft: &NewDepartment) -> RepoResult<Department> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_hospital_exists(&tx, draft)?;
        tx.execute(
            "INSERT INTO departments (name, hospital_id) VALUES (?1, ?2);",
            params![draft.name.as_str(), draft.hospital_id],
        )
        .map_err(|err| map_write_error(err, draft))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(draft.clone().into_record(id))
    }

    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        load_department(self.conn, id)
    }

    fn list_departments(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let departments = stmt
            .query_map([], parse_department_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(departments)
    }

    fn update_department(
        &self,
        id: DepartmentId,
        draft: &NewDepartment,
    ) -> RepoResult<Department> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if load_department(&tx, id)?.is_none() {
            return Err(RepoError::NotFound {
                entity: EntityKind::Department,
                id,
            });
        }
        ensure_hospital_exists(&tx, draft)?;

        tx.execute(
            "UPDATE departments
             SET
                name = ?1,
                hospital_id = ?2
             WHERE id = ?3;",
            params![draft.name.as_str(), draft.hospital_id, id],
        )
        .map_err(|err| map_write_error(err, draft))?;
        tx.commit()?;

        Ok(draft.clone().into_record(id))
    }

    fn delete_department(&self, id: DepartmentId) -> RepoResult<Department> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let department = load_department(&tx, id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::Department,
            id,
        })?;

        tx.execute("DELETE FROM departments WHERE id = ?1;", [id])
            .map_err(map_cascade_error)?;
        tx.commit()?;

        Ok(department)
    }
}

fn ensure_hospital_exists(conn: &Connection, draft: &NewDepartment) -> RepoResult<()> {
    if row_exists(conn, "hospitals", draft.hospital_id)? {
        return Ok(());
    }
    Err(ValidationError::MissingParent {
        parent: EntityKind::Hospital,
        id: draft.hospital_id,
    }
    .into())
}

fn load_department(conn: &Connection, id: DepartmentId) -> RepoResult<Option<Department>> {
    let department = conn
        .query_row(
            &format!("{DEPARTMENT_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_department_row,
        )
        .optional()?;
    Ok(department)
}

fn parse_department_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get("id")?,
        name: row.get("name")?,
        hospital_id: row.get("hospital_id")?,
    })
}

fn map_write_error(err: rusqlite::Error, draft: &NewDepartment) -> RepoError {
    match constraint_violation(&err) {
        Some(Constraint::ForeignKey) => ValidationError::MissingParent {
            parent: EntityKind::Hospital,
            id: draft.hospital_id,
        }
        .into(),
        Some(_) => RepoError::Integrity(err.to_string()),
        None => err.into(),
    }
}
