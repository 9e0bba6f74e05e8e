//! Wrong-Way Monitor Dashboard Library
//!
//! Live monitoring view for the wrong-way detection system.
//!
//! ## Architecture (5 Components)
//!
//! 1. ViolationClient - Detection backend adapter (`/violations`, `/stats`)
//! 2. PollingOrchestrator - Fixed-interval polling into the view state
//! 3. FetchStatusTracker - Per-resource fetch health
//! 4. DashboardRenderer - Pure view state to display model projection
//! 5. WebAPI - HTML/JSON dashboard and health endpoints
//!
//! ## Data Flow
//!
//! PollingOrchestrator -> ViewStore -> DashboardRenderer -> WebAPI.
//! The renderer never triggers fetches and the poller never looks at
//! rendered output.

pub mod dashboard_renderer;
pub mod error;
pub mod fetch_status_tracker;
pub mod models;
pub mod polling_orchestrator;
pub mod state;
pub mod violation_client;
pub mod web_api;

pub use error::{Error, Result};
pub use state::AppState;
