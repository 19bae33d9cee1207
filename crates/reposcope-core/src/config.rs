//! Configuration types for reposcope.
//!
//! [`GlobalConfig`] is user-level configuration stored in
//! `~/.reposcope/config.yaml`. Every key is optional; a missing file yields
//! the defaults below.
//!
//! ```yaml
//! github:
//!   apiBaseUrl: https://api.github.com
//!   requestTimeoutSecs: 15
//!   maxRetries: 2
//!   retryBackoffMs: 500
//! exploration:
//!   fetchConcurrency: 4
//!   comprehensiveCap: 50
//! orchestration:
//!   budgetSecs: 90
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reposcope_github::{GitHubClientConfig, DEFAULT_API_BASE_URL, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_FILENAME, REPOSCOPE_HOME_DIR};
use crate::errors::RepoScopeError;
use crate::types::AnalysisDepth;

// ======================================================================
// Defaults
// ======================================================================

/// Default per-request timeout against the hosting API.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Default number of retries for retryable GET failures.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default delay before the first retry (doubled per attempt).
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

/// Default number of concurrent file fetches (1 = sequential).
pub const DEFAULT_FETCH_CONCURRENCY: usize = 1;

/// Upper bound on concurrent file fetches.
pub const MAX_FETCH_CONCURRENCY: usize = 5;

/// Pattern caps per analysis depth.
pub const DEFAULT_BASIC_CAP: usize = 15;
pub const DEFAULT_STANDARD_CAP: usize = 30;
pub const DEFAULT_COMPREHENSIVE_CAP: usize = 50;

/// Default wall-clock budget for one analysis run.
pub const DEFAULT_BUDGET_SECS: u64 = 90;

// ============================================================================
// GlobalConfig
// ============================================================================

/// User-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Hosting API connection settings.
    #[serde(default)]
    pub github: GitHubSettings,

    /// File selection and fetch settings.
    #[serde(default)]
    pub exploration: ExplorationConfig,

    /// Whole-run settings.
    #[serde(default)]
    pub orchestration: OrchestrationConfig,
}

impl GlobalConfig {
    /// Load the global configuration from the default location
    /// (`~/.reposcope/config.yaml`).
    ///
    /// # Errors
    ///
    /// Returns [`RepoScopeError::InvalidGlobalConfig`] if the file exists but
    /// cannot be parsed.
    pub fn load_default() -> Result<Self, RepoScopeError> {
        match Self::default_path() {
            Some(path) => Self::from_path(&path),
            None => {
                tracing::debug!("Could not determine home directory, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load the global configuration from a specific path.
    ///
    /// If the file does not exist, returns a default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RepoScopeError::InvalidGlobalConfig`] if the file exists but
    /// cannot be parsed, and [`RepoScopeError::InvalidConfiguration`] if
    /// validation fails.
    pub fn from_path(path: &Path) -> Result<Self, RepoScopeError> {
        if !path.exists() {
            tracing::debug!(
                "Global config not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            RepoScopeError::InvalidGlobalConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            RepoScopeError::InvalidGlobalConfig(format!(
                "Failed to parse {}: {}",
                path.display(),
                e
            ))
        })?;

        for warning in config.validate()? {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(config)
    }

    /// Get the default global config directory (`~/.reposcope`).
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(REPOSCOPE_HOME_DIR))
    }

    /// Get the default global config file path (`~/.reposcope/config.yaml`).
    pub fn default_path() -> Option<PathBuf> {
        Self::default_dir().map(|d| d.join(CONFIG_FILENAME))
    }

    /// Validate the configuration.
    ///
    /// Returns the first critical error as
    /// [`RepoScopeError::InvalidConfiguration`]; non-fatal issues are
    /// collected and returned as warnings.
    pub fn validate(&self) -> Result<Vec<String>, RepoScopeError> {
        let mut warnings = Vec::new();
        warnings.extend(self.github.validate()?);
        warnings.extend(self.exploration.validate()?);
        warnings.extend(self.orchestration.validate()?);

        if self.github.request_timeout_secs >= self.orchestration.budget_secs {
            warnings.push(format!(
                "github.requestTimeoutSecs={} is not below orchestration.budgetSecs={}; a single stalled request can consume the whole budget",
                self.github.request_timeout_secs, self.orchestration.budget_secs
            ));
        }

        Ok(warnings)
    }
}

// ============================================================================
// GitHubSettings
// ============================================================================

/// Hosting API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubSettings {
    /// API root (GitHub Enterprise: `https://host/api/v3`).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}
fn default_retry_backoff_ms() -> u64 {
    DEFAULT_RETRY_BACKOFF_MS
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
        }
    }
}

impl GitHubSettings {
    /// Client settings for one analysis run.
    pub fn to_client_config(&self) -> GitHubClientConfig {
        GitHubClientConfig {
            api_base_url: self.api_base_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
            max_retries: self.max_retries,
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
            deadline: None,
        }
    }

    /// # Errors
    /// Returns an error for a non-HTTP API URL, an empty user agent or a zero
    /// request timeout.
    pub fn validate(&self) -> Result<Vec<String>, RepoScopeError> {
        let mut warnings = Vec::new();

        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://"))
        {
            return Err(RepoScopeError::InvalidConfiguration {
                message: format!("github.apiBaseUrl `{}` is not an HTTP URL", self.api_base_url),
                hint: format!("Use {} or your GitHub Enterprise /api/v3 URL", DEFAULT_API_BASE_URL),
            });
        }

        if self.user_agent.trim().is_empty() {
            return Err(RepoScopeError::InvalidConfiguration {
                message: "github.userAgent cannot be empty".to_string(),
                hint: "GitHub rejects requests without a User-Agent; remove the key to use the default"
                    .to_string(),
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(RepoScopeError::InvalidConfiguration {
                message: "github.requestTimeoutSecs cannot be 0".to_string(),
                hint: format!(
                    "Set requestTimeoutSecs to at least 1 (default: {})",
                    DEFAULT_REQUEST_TIMEOUT_SECS
                ),
            });
        }

        if self.api_base_url.starts_with("http://") {
            warnings.push(format!(
                "github.apiBaseUrl={} uses plain HTTP; the access token is sent unencrypted",
                self.api_base_url
            ));
        }

        if self.max_retries > 5 {
            warnings.push(format!(
                "github.maxRetries={} is high; failing runs may take a long time (recommended: 0-3)",
                self.max_retries
            ));
        }

        Ok(warnings)
    }
}

// ============================================================================
// ExplorationConfig
// ============================================================================

/// File selection and fetch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorationConfig {
    /// Worker threads for file-content fetches (1-5, 1 = sequential).
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    #[serde(default = "default_basic_cap")]
    pub basic_cap: usize,

    #[serde(default = "default_standard_cap")]
    pub standard_cap: usize,

    #[serde(default = "default_comprehensive_cap")]
    pub comprehensive_cap: usize,
}

fn default_fetch_concurrency() -> usize {
    DEFAULT_FETCH_CONCURRENCY
}
fn default_basic_cap() -> usize {
    DEFAULT_BASIC_CAP
}
fn default_standard_cap() -> usize {
    DEFAULT_STANDARD_CAP
}
fn default_comprehensive_cap() -> usize {
    DEFAULT_COMPREHENSIVE_CAP
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            basic_cap: DEFAULT_BASIC_CAP,
            standard_cap: DEFAULT_STANDARD_CAP,
            comprehensive_cap: DEFAULT_COMPREHENSIVE_CAP,
        }
    }
}

impl ExplorationConfig {
    /// Pattern cap for `depth`.
    pub fn cap_for(&self, depth: AnalysisDepth) -> usize {
        match depth {
            AnalysisDepth::Basic => self.basic_cap,
            AnalysisDepth::Standard => self.standard_cap,
            AnalysisDepth::Comprehensive => self.comprehensive_cap,
        }
    }

    /// # Errors
    /// Returns an error when `fetchConcurrency` is outside 1-5.
    ///
    /// # Warnings
    /// - a zero cap (only critical files will be fetched)
    /// - caps that shrink with increasing depth
    /// - caps above the default comprehensive cap (more API requests per run)
    pub fn validate(&self) -> Result<Vec<String>, RepoScopeError> {
        let mut warnings = Vec::new();

        if self.fetch_concurrency == 0 || self.fetch_concurrency > MAX_FETCH_CONCURRENCY {
            return Err(RepoScopeError::InvalidConfiguration {
                message: format!(
                    "exploration.fetchConcurrency={} is out of range",
                    self.fetch_concurrency
                ),
                hint: format!(
                    "Set fetchConcurrency between 1 and {} (1 = sequential)",
                    MAX_FETCH_CONCURRENCY
                ),
            });
        }

        for (key, cap) in [
            ("basicCap", self.basic_cap),
            ("standardCap", self.standard_cap),
            ("comprehensiveCap", self.comprehensive_cap),
        ] {
            if cap == 0 {
                warnings.push(format!(
                    "exploration.{}=0; only critical files will be fetched at that depth",
                    key
                ));
            }
            if cap > DEFAULT_COMPREHENSIVE_CAP * 4 {
                warnings.push(format!(
                    "exploration.{}={} is very large; each selected file costs one API request",
                    key, cap
                ));
            }
        }

        if self.basic_cap > self.standard_cap || self.standard_cap > self.comprehensive_cap {
            warnings.push(format!(
                "exploration caps are not increasing with depth (basic={}, standard={}, comprehensive={})",
                self.basic_cap, self.standard_cap, self.comprehensive_cap
            ));
        }

        Ok(warnings)
    }
}

// ============================================================================
// OrchestrationConfig
// ============================================================================

/// Whole-run settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationConfig {
    /// Wall-clock budget for one run, in seconds.
    #[serde(default = "default_budget_secs")]
    pub budget_secs: u64,
}

fn default_budget_secs() -> u64 {
    DEFAULT_BUDGET_SECS
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            budget_secs: DEFAULT_BUDGET_SECS,
        }
    }
}

impl OrchestrationConfig {
    pub fn budget(&self) -> Duration {
        Duration::from_secs(self.budget_secs)
    }

    /// # Errors
    /// Returns an error for a zero budget.
    pub fn validate(&self) -> Result<Vec<String>, RepoScopeError> {
        let mut warnings = Vec::new();

        if self.budget_secs == 0 {
            return Err(RepoScopeError::InvalidConfiguration {
                message: "orchestration.budgetSecs cannot be 0".to_string(),
                hint: format!("Set budgetSecs to at least 1 (default: {})", DEFAULT_BUDGET_SECS),
            });
        }

        if self.budget_secs > 600 {
            warnings.push(format!(
                "orchestration.budgetSecs={} is very long; stalled runs will hold resources for that long",
                self.budget_secs
            ));
        }

        Ok(warnings)
    }
}
