//! Dashboard routes

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};

use super::html::render_page;
use crate::dashboard_renderer::{render, DashboardView};
use crate::state::AppState;

/// Create router with all dashboard routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/dashboard", get(dashboard_view))
        .route("/api/health", get(super::health_check))
        .with_state(state)
}

async fn current_view(state: &AppState) -> DashboardView {
    let view = state.view.snapshot().await;
    render(&view, &state.render)
}

/// GET / - HTML dashboard
async fn dashboard_page(State(state): State<AppState>) -> impl IntoResponse {
    let view = current_view(&state).await;
    let refresh_secs = state.config.poll_interval.as_secs_f64().ceil() as u64;
    Html(render_page(&view, refresh_secs))
}

/// GET /api/dashboard - display model as JSON
async fn dashboard_view(State(state): State<AppState>) -> impl IntoResponse {
    Json(current_view(&state).await)
}
