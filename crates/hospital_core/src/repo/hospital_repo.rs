//! Hospital repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide typed CRUD over the `hospitals` table.
//! - Map `UNIQUE` failures on `name`/`address` to duplicate validation errors.
//!
//! # Invariants
//! - Listing is ordered by `id ASC`.
//! - Deleting a hospital cascades through `ON DELETE CASCADE` foreign keys.

use super::{
    constraint_violation, ensure_connection_ready, map_cascade_error, Constraint, RepoError,
    RepoResult,
};
use crate::model::hospital::{Hospital, HospitalId, NewHospital};
use crate::model::{EntityKind, ValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const HOSPITAL_SELECT_SQL: &str = "SELECT
    id,
    name,
    foundation_year,
    address,
    capacity
FROM hospitals";

/// Repository interface for hospital CRUD operations.
pub trait HospitalRepository {
    /// Inserts a hospital and returns it with its assigned id.
    fn create_hospital(&self, draft: &NewHospital) -> RepoResult<Hospital>;
    /// Loads one hospital by id.
    fn get_hospital(&self, id: HospitalId) -> RepoResult<Option<Hospital>>;
    /// Lists every hospital.
    fn list_hospitals(&self) -> RepoResult<Vec<Hospital>>;
    /// Overwrites all caller fields of an existing hospital.
    fn update_hospital(&self, id: HospitalId, draft: &NewHospital) -> RepoResult<Hospital>;
    /// Deletes a hospital with its departments and doctors; returns the removed row.
    fn delete_hospital(&self, id: HospitalId) -> RepoResult<Hospital>;
}

/// SQLite-backed hospital repository.
pub struct SqliteHospitalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHospitalRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "hospitals")?;
        Ok(Self { conn })
    }
}

impl HospitalRepository for SqliteHospitalRepository<'_> {
    fn create_hospital(&self, draft: &NewHospital) -> RepoResult<Hospital> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO hospitals (
                name,
                foundation_year,
                address,
                capacity
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.name.as_str(),
                draft.foundation_year,
                draft.address.as_str(),
                draft.capacity,
            ],
        )
        .map_err(|err| map_write_error(err, draft))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(draft.clone().into_record(id))
    }

    fn get_hospital(&self, id: HospitalId) -> RepoResult<Option<Hospital>> {
        load_hospital(self.conn, id)
    }

    fn list_hospitals(&self) -> RepoResult<Vec<Hospital>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HOSPITAL_SELECT_SQL} ORDER BY id ASC;"))?;
        let hospitals = stmt
            .query_map([], parse_hospital_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(hospitals)
    }

    fn update_hospital(&self, id: HospitalId, draft: &NewHospital) -> RepoResult<Hospital> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx
            .execute(
                "UPDATE hospitals
                 SET
                    name = ?1,
                    foundation_year = ?2,
                    address = ?3,
                    capacity = ?4
                 WHERE id = ?5;",
                params![
                    draft.name.as_str(),
                    draft.foundation_year,
                    draft.address.as_str(),
                    draft.capacity,
                    id,
                ],
            )
            .map_err(|err| map_write_error(err, draft))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Hospital,
                id,
            });
        }
        tx.commit()?;

        Ok(draft.clone().into_record(id))
    }

    fn delete_hospital(&self, id: HospitalId) -> RepoResult<Hospital> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let hospital = load_hospital(&tx, id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::Hospital,
            id,
        })?;

        tx.execute("DELETE FROM hospitals WHERE id = ?1;", [id])
            .map_err(map_cascade_error)?;
        tx.commit()?;

        Ok(hospital)
    }
}

fn load_hospital(conn: &Connection, id: HospitalId) -> RepoResult<Option<Hospital>> {
    let hospital = conn
        .query_row(
            &format!("{HOSPITAL_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_hospital_row,
        )
        .optional()?;
    Ok(hospital)
}

fn parse_hospital_row(row: &Row<'_>) -> rusqlite::Result<Hospital> {
    Ok(Hospital {
        id: row.get("id")?,
        name: row.get("name")?,
        foundation_year: row.get("foundation_year")?,
        address: row.get("address")?,
        capacity: row.get("capacity")?,
    })
}

fn map_write_error(err: rusqlite::Error, draft: &NewHospital) -> RepoError {
    match constraint_violation(&err) {
        Some(Constraint::Unique(column)) if column == "hospitals.name" => {
            ValidationError::Duplicate {
                entity: EntityKind::Hospital,
                field: "name",
                value: draft.name.clone(),
            }
            .into()
        }
        Some(Constraint::Unique(column)) if column == "hospitals.address" => {
            ValidationError::Duplicate {
                entity: EntityKind::Hospital,
                field: "address",
                value: draft.address.clone(),
            }
            .into()
        }
        Some(_) => RepoError::Integrity(err.to_string()),
        None => err.into(),
    }
}
