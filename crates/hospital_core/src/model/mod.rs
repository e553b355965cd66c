//! Registry domain model for the hospital → department → doctor hierarchy.
//!
//! # Responsibility
//! - Define persisted records and caller-supplied drafts per entity.
//! - Own field-level validation shared by create and update paths.
//!
//! # Invariants
//! - Record ids are assigned by storage and never change.
//! - Drafts carry every caller field; there is no partial update shape.

pub mod department;
pub mod doctor;
pub mod hospital;
mod validation;

pub use validation::{ValidationError, MAX_TEXT_LEN};

use std::fmt::{Display, Formatter};

/// Registry entity discriminator used in errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Hospital,
    Department,
    Doctor,
}

impl EntityKind {
    /// Stable lowercase name, matching the HTTP resource path segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Department => "department",
            Self::Doctor => "doctor",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
