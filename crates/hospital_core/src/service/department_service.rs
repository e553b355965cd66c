//! Department use-case service.

use super::log_write;
use crate::model::department::{Department, DepartmentId, NewDepartment};
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::RepoResult;
use std::time::Instant;

/// Use-case service wrapper for department CRUD operations.
pub struct DepartmentService<R: DepartmentRepository> {
    repo: R,
}

impl<R: DepartmentRepository> DepartmentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a department under an existing hospital.
    ///
    /// # Contract
    /// - Unknown `hospital_id` fails with `ValidationError::MissingParent`.
    pub fn create_department(&self, draft: &NewDepartment) -> RepoResult<Department> {
        let started_at = Instant::now();
        let result = self.repo.create_department(draft);
        log_write("department_create", started_at, &result, |d| d.id);
        result
    }

    pub fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        self.repo.get_department(id)
    }

    pub fn list_departments(&self) -> RepoResult<Vec<Department>> {
        self.repo.list_departments()
    }

    /// Overwrites name and hospital link; the new hospital must exist.
    pub fn update_department(
        &self,
        id: DepartmentId,
        draft: &NewDepartment,
    ) -> RepoResult<Department> {
        let started_at = Instant::now();
        let result = self.repo.update_department(id, draft);
        log_write("department_update", started_at, &result, |d| d.id);
        result
    }

    /// Deletes a department and its doctors.
    pub fn delete_department(&self, id: DepartmentId) -> RepoResult<Department> {
        let started_at = Instant::now();
        let result = self.repo.delete_department(id);
        log_write("department_delete", started_at, &result, |d| d.id);
        result
    }
}
