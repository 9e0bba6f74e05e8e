//! Shared data models
//!
//! Wire records served by the detection backend and the client-held
//! view state built from them.

use crate::fetch_status_tracker::ResourceStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Camera id the backend assigns when the edge node omits one
pub const DEFAULT_CAMERA_ID: &str = "CAM-01";

fn default_camera_id() -> String {
    DEFAULT_CAMERA_ID.to_string()
}

/// One detected wrong-way incident (`GET /violations` element)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationEvent {
    /// Identity key, stable across polls
    pub event_id: String,
    #[serde(default = "default_camera_id")]
    pub camera_id: String,
    /// Only unique within a camera session
    pub track_id: i64,
    /// Seconds since epoch, may be fractional
    pub timestamp: f64,
    /// Backend-side path of the recorded clip (`\` or `/` separated)
    pub evidence_path: String,
}

/// Aggregate counters (`GET /stats`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_violations: u64,
    pub cameras_active: u64,
}

/// Latest successfully fetched backend data
///
/// Each field is replaced wholesale by the poller when its own resource
/// is fetched. The two fields may come from different cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    /// Backend order (most recent first)
    pub violations: Vec<ViolationEvent>,
    pub stats: Stats,
}

/// Backend resource polled each cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Violations,
    Stats,
}

impl Resource {
    /// Path below the API base
    pub fn path(self) -> &'static str {
        match self {
            Resource::Violations => "/violations",
            Resource::Stats => "/stats",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Violations => write!(f, "violations"),
            Resource::Stats => write!(f, "stats"),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" while any resource is failing
    pub status: String,
    pub version: String,
    pub uptime_sec: u64,
    pub api_url: String,
    pub display_zone: String,
    pub resources: Vec<ResourceStatus>,
}
