//! Route table.

use axum::{routing::get, Router};

use crate::handlers::{department, doctor, health, hospital};
use crate::state::AppState;

/// Creates all registry routes.
///
/// # Routes
/// - `GET /health`
/// - `POST|GET /hospital`, `GET|PUT|DELETE /hospital/{id}`
/// - `POST|GET /department`, `GET|PUT|DELETE /department/{id}`
/// - `POST|GET /doctor`, `GET|PUT|DELETE /doctor/{id}`
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/hospital",
            get(hospital::list_hospitals).post(hospital::create_hospital),
        )
        .route(
            "/hospital/{id}",
            get(hospital::get_hospital)
                .put(hospital::update_hospital)
                .delete(hospital::delete_hospital),
        )
        .route(
            "/department",
            get(department::list_departments).post(department::create_department),
        )
        .route(
            "/department/{id}",
            get(department::get_department)
                .put(department::update_department)
                .delete(department::delete_department),
        )
        .route(
            "/doctor",
            get(doctor::list_doctors).post(doctor::create_doctor),
        )
        .route(
            "/doctor/{id}",
            get(doctor::get_doctor)
                .put(doctor::update_doctor)
                .delete(doctor::delete_doctor),
        )
        .with_state(state)
}
