//! Application state
//!
//! Holds configuration and the components shared across handlers

use crate::dashboard_renderer::{DisplayZone, RenderConfig, DEFAULT_PLACEHOLDER_URL};
use crate::error::Result;
use crate::fetch_status_tracker::FetchStatusTracker;
use crate::polling_orchestrator::ViewStore;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shortest per-request timeout accepted from the environment
pub const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Detection backend URL (`/violations`, `/stats`)
    pub api_url: String,
    /// Evidence content server URL (`/content/{file}`)
    pub content_url: String,
    /// Image shown when an evidence preview fails to load
    pub placeholder_url: String,
    /// Polling cadence
    pub poll_interval: Duration,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// IANA zone for card times; host local zone when unset
    pub display_tz: Option<String>,
    /// Server port
    pub port: u16,
    /// Server host
    pub host: String,
}

impl AppConfig {
    /// Build from a variable lookup, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("API_URL").unwrap_or_else(|| "http://localhost:8000".to_string());

        Self {
            content_url: lookup("CONTENT_URL").unwrap_or_else(|| api_url.clone()),
            placeholder_url: lookup("PLACEHOLDER_IMAGE_URL")
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER_URL.to_string()),
            poll_interval: lookup("POLL_INTERVAL_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_millis(2000)),
            request_timeout: lookup("REQUEST_TIMEOUT_SEC")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(10))
                .max(MIN_REQUEST_TIMEOUT),
            display_tz: lookup("DISPLAY_TZ").filter(|v| !v.trim().is_empty()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            api_url,
        }
    }

    /// Renderer settings; fails on an unknown `DISPLAY_TZ`
    pub fn render_config(&self) -> Result<RenderConfig> {
        let zone = DisplayZone::from_name(self.display_tz.as_deref())?;
        Ok(RenderConfig::new(self.content_url.clone(), zone)
            .with_placeholder(self.placeholder_url.clone()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// Latest view state (written by the poller)
    pub view: ViewStore,
    /// Per-resource fetch status
    pub fetch_status: Arc<FetchStatusTracker>,
    /// Renderer settings
    pub render: Arc<RenderConfig>,
    /// Process start, for uptime
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        view: ViewStore,
        fetch_status: Arc<FetchStatusTracker>,
        render: RenderConfig,
    ) -> Self {
        Self {
            config,
            view,
            fetch_status,
            render: Arc::new(render),
            started_at: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.content_url, "http://localhost:8000");
        assert_eq!(config.placeholder_url, DEFAULT_PLACEHOLDER_URL);
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.display_tz, None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_zero_request_timeout_is_clamped() {
        let config = config_from(&[("REQUEST_TIMEOUT_SEC", "0")]);
        assert_eq!(config.request_timeout, MIN_REQUEST_TIMEOUT);

        let config = config_from(&[("REQUEST_TIMEOUT_SEC", "30")]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_content_url_follows_api_url() {
        let config = config_from(&[("API_URL", "http://10.0.0.5:8000")]);
        assert_eq!(config.content_url, "http://10.0.0.5:8000");

        let config = config_from(&[
            ("API_URL", "http://10.0.0.5:8000"),
            ("CONTENT_URL", "http://files.local"),
        ]);
        assert_eq!(config.content_url, "http://files.local");
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let config = config_from(&[("POLL_INTERVAL_MS", "soon"), ("PORT", "http")]);
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_render_config_zone() {
        let config = config_from(&[("DISPLAY_TZ", "Asia/Tokyo")]);
        let render = config.render_config().unwrap();
        assert_eq!(render.zone, DisplayZone::Named(chrono_tz::Asia::Tokyo));

        let config = config_from(&[("DISPLAY_TZ", "Nowhere/Land")]);
        assert!(matches!(config.render_config(), Err(Error::Config(_))));
    }
}
