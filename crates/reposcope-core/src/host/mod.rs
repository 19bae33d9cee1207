//! Source-hosting abstraction.
//!
//! The explorer only needs three calls: repository metadata, a full file
//! listing of one branch, and individual file contents. [`RepositoryHost`]
//! captures exactly that so the pipeline runs unchanged against:
//!
//! - [`GitHubHost`]: the GitHub REST API (one client per run)
//! - [`LocalHost`]: a checkout on disk
//! - [`MemoryHost`]: a snapshot held in memory

use crate::errors::RepoScopeError;
use crate::repo_url::RepositoryRef;
use crate::types::{RepositoryInfo, RepositoryTree};

mod github;
mod local;
mod memory;

pub use github::GitHubHost;
pub use local::LocalHost;
pub use memory::MemoryHost;

/// Decoded file content as returned by a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub content: String,
    /// Size in bytes.
    pub size: u64,
}

/// Read-only access to one hosted repository.
///
/// Implementations must be shareable across the explorer's fetch workers.
pub trait RepositoryHost: Send + Sync {
    /// Fetch repository metadata (including the default branch).
    fn repository(&self, reference: &RepositoryRef) -> Result<RepositoryInfo, RepoScopeError>;

    /// List every file of `branch`, recursively.
    fn tree(&self, reference: &RepositoryRef, branch: &str)
        -> Result<RepositoryTree, RepoScopeError>;

    /// Fetch and decode one file at `branch`.
    fn file_content(
        &self,
        reference: &RepositoryRef,
        path: &str,
        branch: &str,
    ) -> Result<RemoteFile, RepoScopeError>;
}
