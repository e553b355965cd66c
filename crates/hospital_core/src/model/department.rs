//! Department records.
//!
//! # Invariants
//! - `hospital_id` references an existing hospital.
//! - Deleting a department removes its doctors.

use super::hospital::HospitalId;
use super::validation::require_text;
use super::{EntityKind, ValidationError};
use serde::{Deserialize, Serialize};

pub type DepartmentId = i64;

/// Persisted department row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub hospital_id: HospitalId,
}

/// Caller-supplied department fields for create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    pub name: String,
    pub hospital_id: HospitalId,
}

impl NewDepartment {
    pub fn new(name: impl Into<String>, hospital_id: HospitalId) -> Self {
        Self {
            name: name.into(),
            hospital_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(EntityKind::Department, "name", &self.name)
    }

    pub fn into_record(self, id: DepartmentId) -> Department {
        Department {
            id,
            name: self.name,
            hospital_id: self.hospital_id,
        }
    }
}
