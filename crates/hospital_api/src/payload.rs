//! Wire payloads.
//!
//! Request bodies carry every caller field (PUT has no partial semantics).
//! Responses are explicit structs built field by field from core records,
//! so a new column never leaks onto the wire by accident.

use hospital_core::{
    Department, DepartmentId, Doctor, DoctorId, Hospital, HospitalId, NewDepartment, NewDoctor,
    NewHospital,
};
use serde::{Deserialize, Serialize};

/// `POST`/`PUT /hospital` body.
#[derive(Debug, Clone, Deserialize)]
pub struct HospitalPayload {
    pub name: String,
    pub foundation_year: i64,
    /// Older clients spell this field `adress`.
    #[serde(alias = "adress")]
    pub address: String,
    pub capacity: i64,
}

impl From<HospitalPayload> for NewHospital {
    fn from(payload: HospitalPayload) -> Self {
        NewHospital::new(
            payload.name,
            payload.foundation_year,
            payload.address,
            payload.capacity,
        )
    }
}

/// Hospital as returned by every `/hospital` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalResponse {
    pub id: HospitalId,
    pub name: String,
    pub foundation_year: i64,
    pub address: String,
    pub capacity: i64,
}

impl From<Hospital> for HospitalResponse {
    fn from(hospital: Hospital) -> Self {
        Self {
            id: hospital.id,
            name: hospital.name,
            foundation_year: hospital.foundation_year,
            address: hospital.address,
            capacity: hospital.capacity,
        }
    }
}

/// `POST`/`PUT /department` body.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentPayload {
    pub name: String,
    pub hospital_id: HospitalId,
}

impl From<DepartmentPayload> for NewDepartment {
    fn from(payload: DepartmentPayload) -> Self {
        NewDepartment::new(payload.name, payload.hospital_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentResponse {
    pub id: DepartmentId,
    pub name: String,
    pub hospital_id: HospitalId,
}

impl From<Department> for DepartmentResponse {
    fn from(department: Department) -> Self {
        Self {
            id: department.id,
            name: department.name,
            hospital_id: department.hospital_id,
        }
    }
}

/// `POST`/`PUT /doctor` body.
#[derive(Debug, Clone, Deserialize)]
pub struct DoctorPayload {
    pub name: String,
    pub birth_year: i64,
    pub start_year: i64,
    pub gender: String,
    pub department_id: DepartmentId,
}

impl From<DoctorPayload> for NewDoctor {
    fn from(payload: DoctorPayload) -> Self {
        NewDoctor::new(
            payload.name,
            payload.birth_year,
            payload.start_year,
            payload.gender,
            payload.department_id,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorResponse {
    pub id: DoctorId,
    pub name: String,
    pub birth_year: i64,
    pub start_year: i64,
    pub gender: String,
    pub department_id: DepartmentId,
}

impl From<Doctor> for DoctorResponse {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name,
            birth_year: doctor.birth_year,
            start_year: doctor.start_year,
            gender: doctor.gender,
            department_id: doctor.department_id,
        }
    }
}
