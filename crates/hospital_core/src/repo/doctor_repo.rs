//! Doctor repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide typed CRUD over the `doctors` table.
//! - Reject dangling `department_id` references inside the write transaction.

use super::{
    constraint_violation, ensure_connection_ready, row_exists, Constraint, RepoError, RepoResult,
};
use crate::model::doctor::{Doctor, DoctorId, NewDoctor};
use crate::model::{EntityKind, ValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const DOCTOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    birth_year,
    start_year,
    gender,
    department_id
FROM doctors";

/// Repository interface for doctor CRUD operations.
pub trait DoctorRepository {
    fn create_doctor(&self, draft: &NewDoctor) -> RepoResult<Doctor>;
    fn get_doctor(&self, id: DoctorId) -> RepoResult<Option<Doctor>>;
    fn list_doctors(&self) -> RepoResult<Vec<Doctor>>;
    fn update_doctor(&self, id: DoctorId, draft: &NewDoctor) -> RepoResult<Doctor>;
    fn delete_doctor(&self, id: DoctorId) -> RepoResult<Doctor>;
}

/// SQLite-backed doctor repository.
pub struct SqliteDoctorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDoctorRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "doctors")?;
        Ok(Self { conn })
    }
}

impl DoctorRepository for SqliteDoctorRepository<'_> {
    fn create_doctor(&self, draft: &NewDoctor) -> RepoResult<Doctor> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_department_exists(&tx, draft)?;
        tx.execute(
            "INSERT INTO doctors (
                name,
                birth_year,
                start_year,
                gender,
                department_id
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.name.as_str(),
                draft.birth_year,
                draft.start_year,
                draft.gender.as_str(),
                draft.department_id,
            ],
        )
        .map_err(|err| map_write_error(err, draft))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(draft.clone().into_record(id))
    }

    fn get_doctor(&self, id: DoctorId) -> RepoResult<Option<Doctor>> {
        load_doctor(self.conn, id)
    }

    fn list_doctors(&self) -> RepoResult<Vec<Doctor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DOCTOR_SELECT_SQL} ORDER BY id ASC;"))?;
        let doctors = stmt
            .query_map([], parse_doctor_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(doctors)
    }

    fn update_doctor(&self, id: DoctorId, draft: &NewDoctor) -> RepoResult<Doctor> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if load_doctor(&tx, id)?.is_none() {
            return Err(RepoError::NotFound {
                entity: EntityKind::Doctor,
                id,
            });
        }
        ensure_department_exists(&tx, draft)?;

        tx.execute(
            "UPDATE doctors
             SET
                name = ?1,
                birth_year = ?2,
                start_year = ?3,
                gender = ?4,
                department_id = ?5
             WHERE id = ?6;",
            params![
                draft.name.as_str(),
                draft.birth_year,
                draft.start_year,
                draft.gender.as_str(),
                draft.department_id,
                id,
            ],
        )
        .map_err(|err| map_write_error(err, draft))?;
        tx.commit()?;

        Ok(draft.clone().into_record(id))
    }

    fn delete_doctor(&self, id: DoctorId) -> RepoResult<Doctor> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let doctor = load_doctor(&tx, id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::Doctor,
            id,
        })?;

        tx.execute("DELETE FROM doctors WHERE id = ?1;", [id])?;
        tx.commit()?;

        Ok(doctor)
    }
}

fn ensure_department_exists(conn: &Connection, draft: &NewDoctor) -> RepoResult<()> {
    if row_exists(conn, "departments", draft.department_id)? {
        return Ok(());
    }
    Err(ValidationError::MissingParent {
        parent: EntityKind::Department,
        id: draft.department_id,
    }
    .into())
}

fn load_doctor(conn: &Connection, id: DoctorId) -> RepoResult<Option<Doctor>> {
    let doctor = conn
        .query_row(
            &format!("{DOCTOR_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_doctor_row,
        )
        .optional()?;
    Ok(doctor)
}

fn parse_doctor_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get("id")?,
        name: row.get("name")?,
        birth_year: row.get("birth_year")?,
        start_year: row.get("start_year")?,
        gender: row.get("gender")?,
        department_id: row.get("department_id")?,
    })
}

fn map_write_error(err: rusqlite::Error, draft: &NewDoctor) -> RepoError {
    match constraint_violation(&err) {
        Some(Constraint::ForeignKey) => ValidationError::MissingParent {
            parent: EntityKind::Department,
            id: draft.department_id,
        }
        .into(),
        Some(_) => RepoError::Integrity(err.to_string()),
        None => err.into(),
    }
}
