//! WebAPI - Dashboard Endpoints
//!
//! ## Responsibilities
//!
//! - Serve the rendered dashboard (HTML and JSON)
//! - Report poller health
//!
//! All routes are read-only.

mod html;
mod routes;

pub use html::render_page;
pub use routes::create_router;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::fetch_status_tracker::FetchStatus;
use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let resources = state.fetch_status.all().await;
    let degraded = resources.iter().any(|r| r.status == FetchStatus::Failing);

    let response = HealthResponse {
        status: if degraded { "degraded" } else { "ok" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_sec: state.started_at.elapsed().as_secs(),
        api_url: state.config.api_url.clone(),
        display_zone: state.render.zone.to_string(),
        resources,
    };

    Json(response)
}
