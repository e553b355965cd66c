//! Doctor records.

use super::department::DepartmentId;
use super::validation::require_text;
use super::{EntityKind, ValidationError};
use serde::{Deserialize, Serialize};

pub type DoctorId = i64;

/// Persisted doctor row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub birth_year: i64,
    pub start_year: i64,
    pub gender: String,
    pub department_id: DepartmentId,
}

/// Caller-supplied doctor fields for create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub birth_year: i64,
    pub start_year: i64,
    pub gender: String,
    pub department_id: DepartmentId,
}

impl NewDoctor {
    pub fn new(
        name: impl Into<String>,
        birth_year: i64,
        start_year: i64,
        gender: impl Into<String>,
        department_id: DepartmentId,
    ) -> Self {
        Self {
            name: name.into(),
            birth_year,
            start_year,
            gender: gender.into(),
            department_id,
        }
    }

    /// Checks required text fields. Year values are stored as given.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(EntityKind::Doctor, "name", &self.name)?;
        require_text(EntityKind::Doctor, "gender", &self.gender)?;
        Ok(())
    }

    pub fn into_record(self, id: DoctorId) -> Doctor {
        Doctor {
            id,
            name: self.name,
            birth_year: self.birth_year,
            start_year: self.start_year,
            gender: self.gender,
            department_id: self.department_id,
        }
    }
}
