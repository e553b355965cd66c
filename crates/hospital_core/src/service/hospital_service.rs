//! Hospital use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Delete removes dependent departments and doctors in the same transaction.

use super::log_write;
use crate::model::hospital::{Hospital, HospitalId, NewHospital};
use crate::repo::hospital_repo::HospitalRepository;
use crate::repo::RepoResult;
use std::time::Instant;

/// Use-case service wrapper for hospital CRUD operations.
pub struct HospitalService<R: HospitalRepository> {
    repo: R,
}

impl<R: HospitalRepository> HospitalService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a hospital and returns it with its assigned id.
    pub fn create_hospital(&self, draft: &NewHospital) -> RepoResult<Hospital> {
        let started_at = Instant::now();
        let result = self.repo.create_hospital(draft);
        log_write("hospital_create", started_at, &result, |h| h.id);
        result
    }

    /// Gets one hospital by id; `None` when absent.
    pub fn get_hospital(&self, id: HospitalId) -> RepoResult<Option<Hospital>> {
        self.repo.get_hospital(id)
    }

    /// Lists all hospitals by ascending id.
    pub fn list_hospitals(&self) -> RepoResult<Vec<Hospital>> {
        self.repo.list_hospitals()
    }

    /// Overwrites every caller field; `NotFound` when the id is absent.
    pub fn update_hospital(&self, id: HospitalId, draft: &NewHospital) -> RepoResult<Hospital> {
        let started_at = Instant::now();
        let result = self.repo.update_hospital(id, draft);
        log_write("hospital_update", started_at, &result, |h| h.id);
        result
    }

    /// Deletes a hospital and everything below it; returns the removed row.
    pub fn delete_hospital(&self, id: HospitalId) -> RepoResult<Hospital> {
        let started_at = Instant::now();
        let result = self.repo.delete_hospital(id);
        log_write("hospital_delete", started_at, &result, |h| h.id);
        result
    }
}
