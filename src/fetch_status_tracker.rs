//! Fetch Status Tracker
//!
//! Tracks the outcome of backend fetches per resource so that a failing
//! backend is visible in logs and on the health endpoint. Transitions are
//! logged once; the per-failure warning is emitted by the poller.

use crate::models::Resource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Fetch health of a single resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    /// Initial state (never fetched)
    Unknown,
    /// Last fetch succeeded
    Healthy,
    /// Last fetch failed
    Failing,
}

/// Fetch status transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatusEvent {
    /// Healthy (or never fetched) -> Failing
    Lost,
    /// Failing -> Healthy
    Recovered,
}

/// Snapshot of a resource's fetch status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceStatus {
    pub resource: Resource,
    pub status: FetchStatus,
    pub consecutive_failures: u32,
    pub last_success_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl ResourceStatus {
    fn unknown(resource: Resource) -> Self {
        Self {
            resource,
            status: FetchStatus::Unknown,
            consecutive_failures: 0,
            last_success_at: None,
            last_error: None,
        }
    }
}

/// Tracks fetch outcomes and detects transitions
pub struct FetchStatusTracker {
    entries: RwLock<HashMap<Resource, ResourceStatus>>,
}

impl FetchStatusTracker {
    /// Create new tracker
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Record a successful fetch
    ///
    /// Returns `Some(Recovered)` when the resource was failing before.
    pub async fn record_success(&self, resource: Resource) -> Option<FetchStatusEvent> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .entry(resource)
            .or_insert_with(|| ResourceStatus::unknown(resource));

        let prev = entry.status;
        entry.status = FetchStatus::Healthy;
        entry.consecutive_failures = 0;
        entry.last_success_at = Some(Utc::now());
        entry.last_error = None;

        match prev {
            FetchStatus::Failing => {
                tracing::info!(resource = %resource, "Backend fetch recovered");
                Some(FetchStatusEvent::Recovered)
            }
            FetchStatus::Unknown | FetchStatus::Healthy => None,
        }
    }

    /// Record a failed fetch
    ///
    /// Returns `Some(Lost)` on the first failure after success, and on a
    /// failing first fetch.
    pub async fn record_failure(
        &self,
        resource: Resource,
        error: &str,
    ) -> Option<FetchStatusEvent> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .entry(resource)
            .or_insert_with(|| ResourceStatus::unknown(resource));

        let prev = entry.status;
        entry.status = FetchStatus::Failing;
        entry.consecutive_failures = entry.consecutive_failures.saturating_add(1);
        entry.last_error = Some(error.to_string());

        match prev {
            FetchStatus::Healthy => {
                tracing::warn!(
                    resource = %resource,
                    "Backend fetch lost - keeping last known data"
                );
                Some(FetchStatusEvent::Lost)
            }
            FetchStatus::Unknown => {
                tracing::warn!(resource = %resource, "Initial backend fetch failed");
                Some(FetchStatusEvent::Lost)
            }
            FetchStatus::Failing => None,
        }
    }

    /// Get status for a resource
    pub async fn get(&self, resource: Resource) -> ResourceStatus {
        self.entries
            .read()
            .await
            .get(&resource)
            .cloned()
            .unwrap_or_else(|| ResourceStatus::unknown(resource))
    }

    /// Status of every polled resource, violations first
    pub async fn all(&self) -> Vec<ResourceStatus> {
        vec![
            self.get(Resource::Violations).await,
            self.get(Resource::Stats).await,
        ]
    }
}

impl Default for FetchStatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
