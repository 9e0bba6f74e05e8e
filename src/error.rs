//! Error handling for the wrong-way dashboard

use crate::models::Resource;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure (connection refused, timeout, reset)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Unexpected status from {resource}: {status}")]
    Status { resource: Resource, status: u16 },

    /// Backend body could not be decoded
    #[error("Malformed {resource} response: {source}")]
    Malformed {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },

    /// Config error
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Short machine-readable code, used in health output
    pub fn code(&self) -> &'static str {
        match self {
            Error::Http(_) => "HTTP_ERROR",
            Error::Status { .. } => "STATUS_ERROR",
            Error::Malformed { .. } => "MALFORMED_BODY",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Io(_) => "IO_ERROR",
        }
    }
}
