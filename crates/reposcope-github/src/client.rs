//! Blocking GitHub REST client with per-request timeouts and bounded retries.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::models::{ContentResponse, FileContent, RepositoryResponse, TreeResponse};
use crate::GitHubError;

/// Public GitHub API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// User agent sent with every request (GitHub rejects requests without one).
pub const DEFAULT_USER_AGENT: &str = concat!("reposcope/", env!("CARGO_PKG_VERSION"));

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Connection settings for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    /// API root, e.g. `https://api.github.com` or a GitHub Enterprise `/api/v3` URL.
    pub api_base_url: String,
    pub user_agent: String,
    /// Timeout applied to each individual request.
    pub timeout: Duration,
    /// Extra attempts after the first failure, for retryable errors only.
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each subsequent attempt.
    pub retry_backoff: Duration,
    /// Hard stop for every call, retries included. Requests are cut short and
    /// no retry starts past this instant.
    pub deadline: Option<Instant>,
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(15),
            max_retries: 2,
            retry_backoff: Duration::from_millis(500),
            deadline: None,
        }
    }
}

/// GitHub REST client bound to one access token.
///
/// Each analysis run builds its own client; nothing is shared between runs.
#[derive(Debug)]
pub struct GitHubClient {
    http: Client,
    token: String,
    config: GitHubClientConfig,
}

impl GitHubClient {
    /// Build a client. An empty token sends unauthenticated requests.
    pub fn new(token: impl Into<String>, config: GitHubClientConfig) -> Result<Self, GitHubError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GitHubError::Client(e.to_string()))?;

        Ok(Self {
            http,
            token: token.into(),
            config,
        })
    }

    pub fn config(&self) -> &GitHubClientConfig {
        &self.config
    }

    /// Fetch repository metadata.
    pub fn get_repository(&self, owner: &str, repo: &str) -> Result<RepositoryResponse, GitHubError> {
        let url = self.endpoint(&["repos", owner, repo], &[])?;
        self.get_json(url)
    }

    /// Fetch the full recursive tree of `branch`.
    pub fn get_tree(&self, owner: &str, repo: &str, branch: &str) -> Result<TreeResponse, GitHubError> {
        let mut segments = vec!["repos", owner, repo, "git", "trees"];
        segments.extend(branch.split('/'));
        let url = self.endpoint(&segments, &[("recursive", "1")])?;
        self.get_json(url)
    }

    /// Fetch and decode a single file at `reference`.
    pub fn get_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<FileContent, GitHubError> {
        let mut segments = vec!["repos", owner, repo, "contents"];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        let url = self.endpoint(&segments, &[("ref", reference)])?;
        let response: ContentResponse = self.get_json(url)?;
        response.decode()
    }

    /// Build an endpoint URL from percent-encoded path segments.
    pub(crate) fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, GitHubError> {
        let base = &self.config.api_base_url;
        let mut url = Url::parse(base).map_err(|e| GitHubError::InvalidUrl {
            url: base.clone(),
            message: e.to_string(),
        })?;

        url.path_segments_mut()
            .map_err(|_| GitHubError::InvalidUrl {
                url: base.clone(),
                message: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GitHubError> {
        let mut attempt = 0u32;
        loop {
            let timeout = self.request_timeout(&url)?;
            match self.send_once(&url, timeout) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = self.config.retry_backoff * 2u32.saturating_pow(attempt);
                    if self.remaining().is_some_and(|left| delay >= left) {
                        tracing::debug!("GET {} failed ({}), no time left to retry", url, e);
                        return Err(GitHubError::Timeout {
                            url: url.to_string(),
                        });
                    }
                    tracing::debug!("GET {} failed ({}), retrying in {}ms", url, e, delay.as_millis());
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Time left before [`GitHubClientConfig::deadline`], if one is set.
    fn remaining(&self) -> Option<Duration> {
        self.config
            .deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Per-request timeout, capped by the deadline.
    fn request_timeout(&self, url: &Url) -> Result<Duration, GitHubError> {
        match self.remaining() {
            None => Ok(self.config.timeout),
            Some(left) if left.is_zero() => Err(GitHubError::Timeout {
                url: url.to_string(),
            }),
            Some(left) => Ok(self.config.timeout.min(left)),
        }
    }

    fn send_once<T: DeserializeOwned>(&self, url: &Url, timeout: Duration) -> Result<T, GitHubError> {
        let mut request = self
            .http
            .get(url.clone())
            .header(ACCEPT, GITHUB_ACCEPT)
            .timeout(timeout);
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let response = request
            .send()
            .map_err(|e| GitHubError::from_transport(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GitHubError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                message: api_error_message(&body),
            });
        }

        response.json::<T>().map_err(|e| {
            if e.is_timeout() {
                GitHubError::Timeout {
                    url: url.to_string(),
                }
            } else {
                GitHubError::Decode {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }
}

/// Extract the `message` field GitHub puts in error bodies.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect())
}
