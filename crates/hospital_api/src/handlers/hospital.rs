//! `/hospital` handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use hospital_core::{
    EntityKind, HospitalId, HospitalService, NewHospital, SqliteHospitalRepository,
};
use log::debug;

use crate::error::{ApiError, ApiResult};
use crate::payload::{HospitalPayload, HospitalResponse};
use crate::state::AppState;

async fn with_service<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&HospitalService<SqliteHospitalRepository<'_>>) -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    state
        .with_conn(move |conn| {
            let service = HospitalService::new(SqliteHospitalRepository::try_new(conn)?);
            f(&service)
        })
        .await
}

/// `POST /hospital` → `201 Created`.
pub async fn create_hospital(
    State(state): State<AppState>,
    payload: Result<Json<HospitalPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<HospitalResponse>)> {
    let Json(payload) = payload?;
    let draft = NewHospital::from(payload);
    let hospital = with_service(&state, move |service| Ok(service.create_hospital(&draft)?)).await?;
    Ok((StatusCode::CREATED, Json(hospital.into())))
}

/// `GET /hospital`.
pub async fn list_hospitals(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<HospitalResponse>>> {
    let hospitals = with_service(&state, move |service| Ok(service.list_hospitals()?)).await?;
    debug!(
        "event=hospital_list module=api status=ok count={}",
        hospitals.len()
    );
    Ok(Json(hospitals.into_iter().map(Into::into).collect()))
}

/// `GET /hospital/{id}`; `404` when absent.
pub async fn get_hospital(
    State(state): State<AppState>,
    id: Result<Path<HospitalId>, PathRejection>,
) -> ApiResult<Json<HospitalResponse>> {
    let Path(id) = id?;
    let hospital = with_service(&state, move |service| Ok(service.get_hospital(id)?))
        .await?
        .ok_or(ApiError::NotFound {
            entity: EntityKind::Hospital,
            id,
        })?;
    Ok(Json(hospital.into()))
}

/// `PUT /hospital/{id}`; full overwrite.
pub async fn update_hospital(
    State(state): State<AppState>,
    id: Result<Path<HospitalId>, PathRejection>,
    payload: Result<Json<HospitalPayload>, JsonRejection>,
) -> ApiResult<Json<HospitalResponse>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let draft = NewHospital::from(payload);
    let hospital =
        with_service(&state, move |service| Ok(service.update_hospital(id, &draft)?)).await?;
    Ok(Json(hospital.into()))
}

/// `DELETE /hospital/{id}`; returns the removed hospital.
pub async fn delete_hospital(
    State(state): State<AppState>,
    id: Result<Path<HospitalId>, PathRejection>,
) -> ApiResult<Json<HospitalResponse>> {
    let Path(id) = id?;
    let hospital = with_service(&state, move |service| Ok(service.delete_hospital(id)?)).await?;
    Ok(Json(hospital.into()))
}
