//! `/department` handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use hospital_core::{
    DepartmentId, DepartmentService, EntityKind, NewDepartment, SqliteDepartmentRepository,
};

use crate::error::{ApiError, ApiResult};
use crate::payload::{DepartmentPayload, DepartmentResponse};
use crate::state::AppState;

async fn with_service<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&DepartmentService<SqliteDepartmentRepository<'_>>) -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    state
        .with_conn(move |conn| {
            let service = DepartmentService::new(SqliteDepartmentRepository::try_new(conn)?);
            f(&service)
        })
        .await
}

/// `POST /department` → `201 Created`; `400` when the hospital is unknown.
pub async fn create_department(
    State(state): State<AppState>,
    payload: Result<Json<DepartmentPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DepartmentResponse>)> {
    let Json(payload) = payload?;
    let draft = NewDepartment::from(payload);
    let department =
        with_service(&state, move |service| Ok(service.create_department(&draft)?)).await?;
    Ok((StatusCode::CREATED, Json(department.into())))
}

pub async fn list_departments(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DepartmentResponse>>> {
    let departments = with_service(&state, move |service| Ok(service.list_departments()?)).await?;
    Ok(Json(departments.into_iter().map(Into::into).collect()))
}

pub async fn get_department(
    State(state): State<AppState>,
    id: Result<Path<DepartmentId>, PathRejection>,
) -> ApiResult<Json<DepartmentResponse>> {
    let Path(id) = id?;
    let department = with_service(&state, move |service| Ok(service.get_department(id)?))
        .await?
        .ok_or(ApiError::NotFound {
            entity: EntityKind::Department,
            id,
        })?;
    Ok(Json(department.into()))
}

pub async fn update_department(
    State(state): State<AppState>,
    id: Result<Path<DepartmentId>, PathRejection>,
    payload: Result<Json<DepartmentPayload>, JsonRejection>,
) -> ApiResult<Json<DepartmentResponse>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let draft = NewDepartment::from(payload);
    let department =
        with_service(&state, move |service| Ok(service.update_department(id, &draft)?)).await?;
    Ok(Json(department.into()))
}

/// `DELETE /department/{id}`; doctors of the department go with it.
pub async fn delete_department(
    State(state): State<AppState>,
    id: Result<Path<DepartmentId>, PathRejection>,
) -> ApiResult<Json<DepartmentResponse>> {
    let Path(id) = id?;
    let department = with_service(&state, move |service| Ok(service.delete_department(id)?)).await?;
    Ok(Json(department.into()))
}
