//! PollingOrchestrator - Fixed-Interval Backend Polling
//!
//! ## Responsibilities
//!
//! - Fetch violations and stats once per cycle (default every 2s)
//! - Replace the matching [`ViewState`] field wholesale on success
//! - Keep the previous field on failure and report it
//! - Discard late results once the poller is stopped
//!
//! The first cycle starts immediately. Cycles are not serialized against
//! each other: a slow cycle does not delay the next tick, and results are
//! applied in arrival order.

use crate::error::Result;
use crate::fetch_status_tracker::FetchStatusTracker;
use crate::models::{Resource, ViewState};
use crate::violation_client::ViolationSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default polling cadence
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Shared view state, written only by the poller
#[derive(Clone, Default)]
pub struct ViewStore {
    inner: Arc<RwLock<ViewState>>,
}

impl ViewStore {
    /// Create a store holding the initial (empty, zeroed) state
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the latest state
    pub async fn snapshot(&self) -> ViewState {
        self.inner.read().await.clone()
    }
}

/// PollingOrchestrator instance
pub struct PollingOrchestrator<S> {
    source: Arc<S>,
    store: ViewStore,
    fetch_status: Arc<FetchStatusTracker>,
    interval: Duration,
}

impl<S: ViolationSource> PollingOrchestrator<S> {
    /// Create new PollingOrchestrator
    pub fn new(source: Arc<S>, store: ViewStore, fetch_status: Arc<FetchStatusTracker>) -> Self {
        Self {
            source,
            store,
            fetch_status,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set polling cadence (minimum 1ms)
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_millis(1));
        self
    }

    /// View store this orchestrator writes to
    pub fn store(&self) -> &ViewStore {
        &self.store
    }

    /// Start polling loop
    ///
    /// Must be called from within a tokio runtime. The returned handle owns
    /// the timer; dropping it stops polling as well.
    pub fn start(self) -> PollerHandle {
        let stopped = Arc::new(AtomicBool::new(false));
        let ctx = CycleContext {
            source: self.source,
            store: self.store.clone(),
            fetch_status: self.fetch_status,
            stopped: stopped.clone(),
        };
        let interval = self.interval;

        tracing::info!(interval_ms = interval.as_millis() as u64, "Starting polling orchestrator");

        let timer = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut cycle: u64 = 0;

            loop {
                // First tick completes immediately
                ticker.tick().await;
                cycle += 1;

                let ctx = ctx.clone();
                tokio::spawn(async move { ctx.run_cycle(cycle).await });
            }
        });

        PollerHandle {
            stopped,
            store: self.store,
            timer,
        }
    }
}

/// Running poller; consumed by [`PollerHandle::stop`]
pub struct PollerHandle {
    stopped: Arc<AtomicBool>,
    store: ViewStore,
    timer: JoinHandle<()>,
}

impl PollerHandle {
    /// View store fed by this poller
    pub fn store(&self) -> &ViewStore {
        &self.store
    }

    /// Stop polling
    ///
    /// After this returns no new cycle is started, and fetches still in
    /// flight have their results dropped on arrival.
    ///
    /// On the current-thread runtime no request is issued after this
    /// returns. On a multi-threaded runtime a cycle that passed its stop
    /// check just before the flag was set may still send its requests;
    /// their results are discarded like any other late result.
    pub async fn stop(mut self) {
        {
            // Taken under the write lock so no apply can interleave
            let _view = self.store.inner.write().await;
            self.stopped.store(true, Ordering::Release);
        }

        self.timer.abort();
        let _ = (&mut self.timer).await;

        tracing::info!("Polling orchestrator stopped");
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stopped.store(true, Ordering::Release);
        self.timer.abort();
    }
}

/// Everything one cycle needs
struct CycleContext<S> {
    source: Arc<S>,
    store: ViewStore,
    fetch_status: Arc<FetchStatusTracker>,
    stopped: Arc<AtomicBool>,
}

impl<S> Clone for CycleContext<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            store: self.store.clone(),
            fetch_status: self.fetch_status.clone(),
            stopped: self.stopped.clone(),
        }
    }
}

impl<S: ViolationSource> CycleContext<S> {
    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// One poll cycle: both resources, independently
    async fn run_cycle(&self, cycle: u64) {
        if self.is_stopped() {
            return;
        }

        tracing::debug!(cycle = cycle, "Poll cycle started");

        tokio::join!(self.refresh_violations(cycle), self.refresh_stats(cycle));
    }

    async fn refresh_violations(&self, cycle: u64) {
        let result = self.source.fetch_violations().await;
        self.settle(Resource::Violations, cycle, result, |view, violations| {
            view.violations = violations;
        })
        .await;
    }

    async fn refresh_stats(&self, cycle: u64) {
        let result = self.source.fetch_stats().await;
        self.settle(Resource::Stats, cycle, result, |view, stats| {
            view.stats = stats;
        })
        .await;
    }

    /// Apply a fetch result, or report it and keep the previous field
    async fn settle<T>(
        &self,
        resource: Resource,
        cycle: u64,
        result: Result<T>,
        apply: impl FnOnce(&mut ViewState, T),
    ) {
        match result {
            Ok(value) => {
                let applied = {
                    let mut view = self.store.inner.write().await;
                    if self.is_stopped() {
                        false
                    } else {
                        apply(&mut view, value);
                        true
                    }
                };

                if !applied {
                    tracing::debug!(
                        resource = %resource,
                        cycle = cycle,
                        "Discarding result after stop"
                    );
                    return;
                }

                tracing::debug!(resource = %resource, cycle = cycle, "View state updated");
                self.fetch_status.record_success(resource).await;
            }
            Err(e) => {
                if self.is_stopped() {
                    return;
                }

                tracing::warn!(
                    resource = %resource,
                    cycle = cycle,
                    error_code = e.code(),
                    error = %e,
                    "Backend fetch failed - keeping previous data"
                );
                self.fetch_status.record_failure(resource, &e.to_string()).await;
            }
        }
    }
}
