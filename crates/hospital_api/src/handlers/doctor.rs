//! `/doctor` handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use hospital_core::{DoctorId, DoctorService, EntityKind, NewDoctor, SqliteDoctorRepository};

use crate::error::{ApiError, ApiResult};
use crate::payload::{DoctorPayload, DoctorResponse};
use crate::state::AppState;

async fn with_service<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&DoctorService<SqliteDoctorRepository<'_>>) -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    state
        .with_conn(move |conn| {
            let service = DoctorService::new(SqliteDoctorRepository::try_new(conn)?);
            f(&service)
        })
        .await
}

pub async fn create_doctor(
    State(state): State<AppState>,
    payload: Result<Json<DoctorPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DoctorResponse>)> {
    let Json(payload) = payload?;
    let draft = NewDoctor::from(payload);
    let doctor = with_service(&state, move |service| Ok(service.create_doctor(&draft)?)).await?;
    Ok((StatusCode::CREATED, Json(doctor.into())))
}

pub async fn list_doctors(State(state): State<AppState>) -> ApiResult<Json<Vec<DoctorResponse>>> {
    let doctors = with_service(&state, move |service| Ok(service.list_doctors()?)).await?;
    Ok(Json(doctors.into_iter().map(Into::into).collect()))
}

pub async fn get_doctor(
    State(state): State<AppState>,
    id: Result<Path<DoctorId>, PathRejection>,
) -> ApiResult<Json<DoctorResponse>> {
    let Path(id) = id?;
    let doctor = with_service(&state, move |service| Ok(service.get_doctor(id)?))
        .await?
        .ok_or(ApiError::NotFound {
            entity: EntityKind::Doctor,
            id,
        })?;
    Ok(Json(doctor.into()))
}

pub async fn update_doctor(
    State(state): State<AppState>,
    id: Result<Path<DoctorId>, PathRejection>,
    payload: Result<Json<DoctorPayload>, JsonRejection>,
) -> ApiResult<Json<DoctorResponse>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let draft = NewDoctor::from(payload);
    let doctor = with_service(&state, move |service| Ok(service.update_doctor(id, &draft)?)).await?;
    Ok(Json(doctor.into()))
}

pub async fn delete_doctor(
    State(state): State<AppState>,
    id: Result<Path<DoctorId>, PathRejection>,
) -> ApiResult<Json<DoctorResponse>> {
    let Path(id) = id?;
    let doctor = with_service(&state, move |service| Ok(service.delete_doctor(id)?)).await?;
    Ok(Json(doctor.into()))
}
