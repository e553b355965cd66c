//! Field validation shared by all registry drafts.

use super::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound for every text column.
pub const MAX_TEXT_LEN: usize = 100;

/// Caller-correctable input problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trim.
    Blank {
        entity: EntityKind,
        field: &'static str,
    },
    /// Text field exceeds [`MAX_TEXT_LEN`] characters.
    TooLong {
        entity: EntityKind,
        field: &'static str,
        max: usize,
    },
    /// Unique column already holds this value.
    Duplicate {
        entity: EntityKind,
        field: &'static str,
        value: String,
    },
    /// Foreign key points at a row that does not exist.
    MissingParent { parent: EntityKind, id: i64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank { entity, field } => write!(f, "{entity}.{field} must not be blank"),
            Self::TooLong { entity, field, max } => {
                write!(f, "{entity}.{field} must be at most {max} characters")
            }
            Self::Duplicate {
                entity,
                field,
                value,
            } => write!(f, "{entity} with {field} `{value}` already exists"),
            Self::MissingParent { parent, id } => write!(f, "{parent} {id} does not exist"),
        }
    }
}

impl Error for ValidationError {}

impl ValidationError {
    /// Short rule name, safe to log.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Blank { .. } => "blank",
            Self::TooLong { .. } => "too_long",
            Self::Duplicate { .. } => "duplicate",
            Self::MissingParent { .. } => "missing_parent",
        }
    }

    /// Offending field name; the foreign key column for a missing parent.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Blank { field, .. }
            | Self::TooLong { field, .. }
            | Self::Duplicate { field, .. } => *field,
            Self::MissingParent {
                parent: EntityKind::Department,
                ..
            } => "department_id",
            Self::MissingParent { .. } => "hospital_id",
        }
    }
}

pub(crate) fn require_text(
    entity: EntityKind,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { entity, field });
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            entity,
            field,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require_text, ValidationError, MAX_TEXT_LEN};
    use crate::model::EntityKind;

    #[test]
    fn require_text_rejects_whitespace_only() {
        let err = require_text(EntityKind::Doctor, "gender", "  \t").unwrap_err();
        assert_eq!(
            err,
            ValidationError::Blank {
                entity: EntityKind::Doctor,
                field: "gender"
            }
        );
    }

    #[test]
    fn require_text_counts_chars_not_bytes() {
        let at_limit = "é".repeat(MAX_TEXT_LEN);
        assert!(require_text(EntityKind::Hospital, "name", &at_limit).is_ok());

        let over_limit = "é".repeat(MAX_TEXT_LEN + 1);
        assert!(matches!(
            require_text(EntityKind::Hospital, "name", &over_limit),
            Err(ValidationError::TooLong { max, .. }) if max == MAX_TEXT_LEN
        ));
    }

    #[test]
    fn messages_name_entity_and_field() {
        let err = ValidationError::Duplicate {
            entity: EntityKind::Hospital,
            field: "address",
            value: "1 Main St".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "hospital with address `1 Main St` already exists"
        );
    }
}
