//! Core domain logic for the hospital registry.
//! This crate is the single source of truth for registry invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, logging_status, LogSettings, LogTarget, LoggingError,
};
pub use model::department::{Department, DepartmentId, NewDepartment};
pub use model::doctor::{Doctor, DoctorId, NewDoctor};
pub use model::hospital::{Hospital, HospitalId, NewHospital};
pub use model::{EntityKind, ValidationError, MAX_TEXT_LEN};
pub use repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use repo::doctor_repo::{DoctorRepository, SqliteDoctorRepository};
pub use repo::hospital_repo::{HospitalRepository, SqliteHospitalRepository};
pub use repo::{RepoError, RepoResult};
pub use service::department_service::DepartmentService;
pub use service::doctor_service::DoctorService;
pub use service::hospital_service::HospitalService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
