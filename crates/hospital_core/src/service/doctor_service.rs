//! Doctor use-case service.

use super::log_write;
use crate::model::doctor::{Doctor, DoctorId, NewDoctor};
use crate::repo::doctor_repo::DoctorRepository;
use crate::repo::RepoResult;
use std::time::Instant;

pub struct DoctorService<R: DoctorRepository> {
    repo: R,
}

impl<R: DoctorRepository> DoctorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_doctor(&self, draft: &NewDoctor) -> RepoResult<Doctor> {
        let started_at = Instant::now();
        let result = self.repo.create_doctor(draft);
        log_write("doctor_create", started_at, &result, |d| d.id);
        result
    }

    pub fn get_doctor(&self, id: DoctorId) -> RepoResult<Option<Doctor>> {
        self.repo.get_doctor(id)
    }

    pub fn list_doctors(&self) -> RepoResult<Vec<Doctor>> {
        self.repo.list_doctors()
    }

    pub fn update_doctor(&self, id: DoctorId, draft: &NewDoctor) -> RepoResult<Doctor> {
        let started_at = Instant::now();
        let result = self.repo.update_doctor(id, draft);
        log_write("doctor_update", started_at, &result, |d| d.id);
        result
    }

    pub fn delete_doctor(&self, id: DoctorId) -> RepoResult<Doctor> {
        let started_at = Instant::now();
        let result = self.repo.delete_doctor(id);
        log_write("doctor_delete", started_at, &result, |d| d.id);
        result
    }
}
