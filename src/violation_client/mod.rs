//! ViolationClient - Detection Backend Adapter
//!
//! ## Responsibilities
//!
//! - Fetch the violation list and the stats summary
//! - Classify failures (transport / status / body)
//!
//! The poller only sees the [`ViolationSource`] trait, so tests can drive
//! it with scripted sources.

use crate::error::{Error, Result};
use crate::models::{Resource, Stats, ViolationEvent};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

/// Read-only access to the detection backend
pub trait ViolationSource: Send + Sync + 'static {
    /// `GET /violations`
    fn fetch_violations(&self) -> impl Future<Output = Result<Vec<ViolationEvent>>> + Send;

    /// `GET /stats`
    fn fetch_stats(&self) -> impl Future<Output = Result<Stats>> + Send;
}

/// HTTP client for the detection backend
pub struct ViolationClient {
    client: reqwest::Client,
    base_url: String,
}

impl ViolationClient {
    /// Create new ViolationClient
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Backend base URL (without trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: Resource) -> Result<T> {
        let url = format!("{}{}", self.base_url, resource.path());

        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                resource,
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        let parsed = serde_json::from_slice(&body)
            .map_err(|source| Error::Malformed { resource, source })?;

        tracing::trace!(resource = %resource, bytes = body.len(), "Backend response decoded");

        Ok(parsed)
    }
}

impl ViolationSource for ViolationClient {
    async fn fetch_violations(&self) -> Result<Vec<ViolationEvent>> {
        self.get_json(Resource::Violations).await
    }

    async fn fetch_stats(&self) -> Result<Stats> {
        self.get_json(Resource::Stats).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            ViolationClient::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_http_error() {
        // Port 9 (discard) on loopback is not expected to have an HTTP listener
        let client = ViolationClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let result = client.fetch_stats().await;
        assert!(matches!(result, Err(Error::Http(_))));
    }
}
