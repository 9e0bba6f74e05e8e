//! Wrong-Way Monitor Dashboard
//!
//! Main entry point: starts the poller and serves the dashboard until
//! Ctrl-C, then stops the poller.

use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wrongway_dashboard::{
    fetch_status_tracker::FetchStatusTracker,
    polling_orchestrator::{PollingOrchestrator, ViewStore},
    state::{AppConfig, AppState},
    violation_client::ViolationClient,
    web_api,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wrongway_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting wrong-way dashboard v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::default();
    let render_config = config.render_config()?;
    tracing::info!(
        api_url = %config.api_url,
        content_url = %config.content_url,
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        display_zone = %render_config.zone,
        "Configuration loaded"
    );

    let client = Arc::new(ViolationClient::new(
        config.api_url.clone(),
        config.request_timeout,
    )?);
    let view = ViewStore::new();
    let fetch_status = Arc::new(FetchStatusTracker::new());

    let poller = PollingOrchestrator::new(client, view.clone(), fetch_status.clone())
        .with_interval(config.poll_interval)
        .start();

    let state = AppState::new(config, view, fetch_status, render_config);

    let app = web_api::create_router(state.clone())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", state.config.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    poller.stop().await;
    served?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
