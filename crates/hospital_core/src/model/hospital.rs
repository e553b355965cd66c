//! Hospital records.
//!
//! # Invariants
//! - `name` and `address` are unique across all hospitals.
//! - Deleting a hospital removes its departments and their doctors.

use super::validation::require_text;
use super::{EntityKind, ValidationError};
use serde::{Deserialize, Serialize};

pub type HospitalId = i64;

/// Persisted hospital row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub foundation_year: i64,
    pub address: String,
    pub capacity: i64,
}

/// Caller-supplied hospital fields for create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHospital {
    pub name: String,
    pub foundation_year: i64,
    pub address: String,
    pub capacity: i64,
}

impl NewHospital {
    pub fn new(
        name: impl Into<String>,
        foundation_year: i64,
        address: impl Into<String>,
        capacity: i64,
    ) -> Self {
        Self {
            name: name.into(),
            foundation_year,
            address: address.into(),
            capacity,
        }
    }

    /// Checks required text fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(EntityKind::Hospital, "name", &self.name)?;
        require_text(EntityKind::Hospital, "address", &self.address)?;
        Ok(())
    }

    /// Attaches a storage-assigned id.
    pub fn into_record(self, id: HospitalId) -> Hospital {
        Hospital {
            id,
            name: self.name,
            foundation_year: self.foundation_year,
            address: self.address,
            capacity: self.capacity,
        }
    }
}
