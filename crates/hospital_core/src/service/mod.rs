//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the HTTP layer decoupled from storage details.
//! - Emit one metadata-only log event per write.

pub mod department_service;
pub mod doctor_service;
pub mod hospital_service;

use crate::repo::{RepoError, RepoResult};
use log::{error, info, warn};
use std::time::Instant;

/// Logs the outcome of one write use case.
///
/// Caller errors (`Validation`, `NotFound`) log at `warn`; storage failures at `error`.
pub(crate) fn log_write<T>(
    event: &'static str,
    started_at: Instant,
    result: &RepoResult<T>,
    id_of: impl Fn(&T) -> i64,
) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(value) => info!(
            "event={event} module=service status=ok id={} duration_ms={duration_ms}",
            id_of(value)
        ),
        Err(err @ (RepoError::Validation(_) | RepoError::NotFound { .. })) => warn!(
            "event={event} module=service status=rejected duration_ms={duration_ms} error_code={} {}",
            error_code(err),
            failure_fields(err)
        ),
        Err(err) => error!(
            "event={event} module=service status=error duration_ms={duration_ms} error_code={} {}",
            error_code(err),
            failure_fields(err)
        ),
    }
}

/// Key/value tail for a failed write. Submitted values never appear here.
fn failure_fields(err: &RepoError) -> String {
    match err {
        RepoError::Validation(rule) => format!("reason={} field={}", rule.reason(), rule.field()),
        RepoError::NotFound { entity, id } => format!("entity={entity} id={id}"),
        other => format!("error={other}"),
    }
}

fn error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Validation(_) => "validation_failed",
        RepoError::NotFound { .. } => "not_found",
        RepoError::Integrity(_) => "integrity_violation",
        RepoError::Db(_) => "db_error",
        RepoError::InvalidData(_) => "invalid_data",
    }
}

#[cfg(test)]
mod tests {
    use super::failure_fields;
    use crate::model::{EntityKind, ValidationError};
    use crate::repo::RepoError;

    #[test]
    fn duplicate_failure_omits_submitted_value() {
        let err = RepoError::Validation(ValidationError::Duplicate {
            entity: EntityKind::Hospital,
            field: "address",
            value: "1 Main St".to_string(),
        });

        let fields = failure_fields(&err);
        assert_eq!(fields, "reason=duplicate field=address");
        assert!(!fields.contains("Main"));
    }

    #[test]
    fn missing_parent_names_foreign_key_column() {
        let err = RepoError::Validation(ValidationError::MissingParent {
            parent: EntityKind::Department,
            id: 999,
        });
        assert_eq!(
            failure_fields(&err),
            "reason=missing_parent field=department_id"
        );

        let not_found = RepoError::NotFound {
            entity: EntityKind::Doctor,
            id: 4,
        };
        assert_eq!(failure_fields(&not_found), "entity=doctor id=4");
    }
}
