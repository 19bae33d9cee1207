//! GitHub REST client for reposcope
//!
//! This crate isolates the HTTP stack (`reqwest`, `base64`) from the analysis
//! engine. It exposes the three calls the explorer needs: repository metadata,
//! a recursive git tree listing and individual file contents.

use thiserror::Error;

pub mod client;
pub mod models;

pub use client::{GitHubClient, GitHubClientConfig, DEFAULT_API_BASE_URL, DEFAULT_USER_AGENT};
pub use models::{ContentResponse, FileContent, RepositoryResponse, TreeEntry, TreeResponse};

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Invalid API URL `{url}`: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("GitHub API returned {status} for {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("File `{path}` has no inline content (encoding: {encoding})")]
    MissingContent { path: String, encoding: String },
}

impl GitHubError {
    /// Whether a retry of the same idempotent GET may succeed.
    ///
    /// Rate limiting (429), server errors, timeouts and connection failures
    /// are retryable; client errors and decode failures are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Timeout { .. } | Self::Transport { .. } => true,
            _ => false,
        }
    }

    pub(crate) fn from_transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}
