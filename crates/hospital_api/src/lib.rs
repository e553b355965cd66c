//! HTTP/JSON surface of the hospital registry.
//!
//! ## API Endpoints
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | POST | `/hospital` | `{name, foundation_year, address, capacity}` | `201` created hospital |
//! | GET | `/hospital` | - | array of hospitals |
//! | GET | `/hospital/{id}` | - | hospital, or `404` |
//! | PUT | `/hospital/{id}` | same as POST | updated hospital, or `404` |
//! | DELETE | `/hospital/{id}` | - | deleted hospital, or `404` |
//!
//! `/department` (`{name, hospital_id}`) and `/doctor`
//! (`{name, birth_year, start_year, gender, department_id}`) follow the same
//! table. `GET /health` reports store reachability.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hospital_api::{create_app, AppState, ServerConfig};
//!
//! let state = AppState::open(ServerConfig::default())?;
//! let app = create_app(state);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod payload;
pub mod routing;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{extract::DefaultBodyLimit, http::StatusCode, Router};
use log::info;
use tower_http::timeout::TimeoutLayer;

/// Creates the application router with body-size and timeout limits from
/// the state's configuration.
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();
    info!(
        "event=app_build module=api status=ok request_timeout_s={} max_body_size={}",
        config.request_timeout, config.max_body_size
    );

    routing::create_routes(state)
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
}
