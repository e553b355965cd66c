//! Health check handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hospital_core::core_version;
use log::error;
use serde_json::json;

use crate::state::AppState;

/// `GET /health`: `200` when the store answers, `503` otherwise.
pub async fn health(State(state): State<AppState>) -> Response {
    let probe = state
        .with_conn(|conn| {
            let one: i64 = conn.query_row("SELECT 1;", [], |row| row.get(0))?;
            Ok(one)
        })
        .await;

    match probe {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "version": core_version() })),
        )
            .into_response(),
        Err(err) => {
            error!("event=health_check module=api status=error error={err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "version": core_version() })),
            )
                .into_response()
        }
    }
}
