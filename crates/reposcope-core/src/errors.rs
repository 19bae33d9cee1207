//! Error types for reposcope-core.

use thiserror::Error;

use crate::engine::PipelineStage;

/// Domain-specific errors for repository analysis.
#[derive(Error, Debug)]
pub enum RepoScopeError {
    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    /// The repository identifier could not be parsed into `owner/repo`.
    #[error("Invalid repository URL `{input}`: {reason}. Expected `owner/repo` or `https://github.com/owner/repo`.")]
    InvalidRepositoryUrl {
        /// The raw input as given by the caller.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Invalid argument provided to an operation.
    #[error("{0}")]
    InvalidArgument(String),

    /// A path or file was not found.
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// An invalid path was provided (e.g., escapes the checkout root).
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    // -------------------------------------------------------------------------
    // Hosting API Errors
    // -------------------------------------------------------------------------
    /// A request to the hosting API failed (HTTP status, transport, decoding).
    #[error("Hosting API request failed ({operation}): {message}")]
    HostRequest {
        /// Which call failed (e.g. "repository metadata").
        operation: String,
        /// Underlying cause.
        message: String,
    },

    /// A request to the hosting API exceeded its per-request timeout.
    #[error("Hosting API request timed out ({operation}): {message}")]
    HostTimeout {
        /// Which call timed out.
        operation: String,
        /// Underlying cause.
        message: String,
    },

    /// A fetched file could not be decoded as text.
    #[error("Failed to decode `{path}`: {message}")]
    FileDecode {
        /// Repository-relative path.
        path: String,
        /// Underlying cause.
        message: String,
    },

    // -------------------------------------------------------------------------
    // Analysis Errors
    // -------------------------------------------------------------------------
    /// A dependency manifest could not be parsed.
    ///
    /// The analyzer logs this and continues; it never aborts a run.
    #[error("Failed to parse {manifest}: {message}")]
    ManifestParse {
        /// Manifest file name (e.g. `package.json`).
        manifest: String,
        /// Parser message.
        message: String,
    },

    /// The whole-run wall-clock budget ran out.
    #[error("Analysis exceeded its {budget_secs}s budget ({elapsed_ms}ms elapsed)")]
    BudgetExceeded {
        /// Configured budget.
        budget_secs: u64,
        /// Time spent when the check fired.
        elapsed_ms: u128,
    },

    /// A pipeline stage failed; wraps the underlying cause.
    #[error("Repository analysis failed during {stage}: {source}")]
    StageFailed {
        /// The stage that failed.
        stage: PipelineStage,
        /// The underlying error.
        source: Box<RepoScopeError>,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    /// Global configuration file is invalid.
    #[error("Global config invalid: {0}")]
    InvalidGlobalConfig(String),

    /// A configuration value is invalid.
    #[error("Invalid configuration: {message}. {hint}")]
    InvalidConfiguration {
        /// Description of the invalid configuration.
        message: String,
        /// Actionable hint on how to fix it.
        hint: String,
    },

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A wrapped generic error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepoScopeError {
    /// The stage a [`RepoScopeError::StageFailed`] error names, if any.
    pub fn failed_stage(&self) -> Option<PipelineStage> {
        match self {
            Self::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The innermost cause, unwrapping any stage wrappers.
    pub fn root_cause(&self) -> &RepoScopeError {
        match self {
            Self::StageFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether this error (or its cause) is a timeout of some kind.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self.root_cause(),
            Self::HostTimeout { .. } | Self::BudgetExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_failed_message_names_stage_and_cause() {
        let err = RepoScopeError::StageFailed {
            stage: PipelineStage::Explore,
            source: Box::new(RepoScopeError::HostRequest {
                operation: "repository metadata".to_string(),
                message: "GitHub API returned 404: Not Found".to_string(),
            }),
        };

        let message = err.to_string();
        assert!(message.contains("repository exploration"));
        assert!(message.contains("404"));
        assert_eq!(err.failed_stage(), Some(PipelineStage::Explore));
        assert!(matches!(err.root_cause(), RepoScopeError::HostRequest { .. }));
    }

    #[test]
    fn test_timeouts_are_distinct() {
        let timeout = RepoScopeError::HostTimeout {
            operation: "file tree".to_string(),
            message: "Request timed out".to_string(),
        };
        let budget = RepoScopeError::BudgetExceeded {
            budget_secs: 90,
            elapsed_ms: 91_000,
        };
        let request = RepoScopeError::HostRequest {
            operation: "file tree".to_string(),
            message: "500".to_string(),
        };

        assert!(timeout.is_timeout());
        assert!(budget.is_timeout());
        assert!(!request.is_timeout());
    }
}
