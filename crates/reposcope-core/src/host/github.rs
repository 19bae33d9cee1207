use reposcope_github::{GitHubClient, GitHubError, RepositoryResponse, TreeResponse};

use super::{RemoteFile, RepositoryHost};
use crate::budget::Deadline;
use crate::config::GitHubSettings;
use crate::errors::RepoScopeError;
use crate::repo_url::RepositoryRef;
use crate::types::{FileEntry, RepositoryInfo, RepositoryTree};

/// [`RepositoryHost`] backed by the GitHub REST API.
#[derive(Debug)]
pub struct GitHubHost {
    client: GitHubClient,
}

impl GitHubHost {
    /// Build a host with its own client. An empty token is unauthenticated.
    ///
    /// No request or retry made through this host runs past `deadline`.
    pub fn new(
        token: &str,
        settings: &GitHubSettings,
        deadline: &Deadline,
    ) -> Result<Self, RepoScopeError> {
        let mut config = settings.to_client_config();
        config.deadline = Some(deadline.expires_at());
        let client =
            GitHubClient::new(token, config).map_err(|e| host_error("client setup", e))?;
        Ok(Self { client })
    }
}

impl RepositoryHost for GitHubHost {
    fn repository(&self, reference: &RepositoryRef) -> Result<RepositoryInfo, RepoScopeError> {
        self.client
            .get_repository(&reference.owner, &reference.repo)
            .map(RepositoryInfo::from)
            .map_err(|e| host_error("repository metadata", e))
    }

    fn tree(
        &self,
        reference: &RepositoryRef,
        branch: &str,
    ) -> Result<RepositoryTree, RepoScopeError> {
        self.client
            .get_tree(&reference.owner, &reference.repo, branch)
            .map(RepositoryTree::from)
            .map_err(|e| host_error("file tree", e))
    }

    fn file_content(
        &self,
        reference: &RepositoryRef,
        path: &str,
        branch: &str,
    ) -> Result<RemoteFile, RepoScopeError> {
        let file = self
            .client
            .get_file(&reference.owner, &reference.repo, path, branch)
            .map_err(|e| host_error("file content", e))?;
        Ok(RemoteFile {
            content: file.content,
            size: file.size,
        })
    }
}

impl From<RepositoryResponse> for RepositoryInfo {
    fn from(response: RepositoryResponse) -> Self {
        Self {
            name: response.name,
            full_name: response.full_name,
            description: response.description,
            language: response.language,
            size_kb: response.size,
            updated_at: response.updated_at,
            default_branch: response.default_branch,
        }
    }
}

impl From<TreeResponse> for RepositoryTree {
    fn from(response: TreeResponse) -> Self {
        let entries = response
            .tree
            .into_iter()
            .filter(|entry| entry.is_blob())
            .map(|entry| FileEntry::file(entry.path, entry.size.unwrap_or(0)))
            .collect();
        Self {
            entries,
            truncated: response.truncated,
        }
    }
}

impl From<GitHubError> for RepoScopeError {
    fn from(err: GitHubError) -> Self {
        host_error("GitHub API", err)
    }
}

/// Map a client error, keeping timeouts distinct from other failures.
fn host_error(operation: &str, err: GitHubError) -> RepoScopeError {
    match err {
        GitHubError::Timeout { .. } => RepoScopeError::HostTimeout {
            operation: operation.to_string(),
            message: err.to_string(),
        },
        GitHubError::MissingContent { ref path, .. } | GitHubError::Decode { url: ref path, .. }
            if operation == "file content" =>
        {
            RepoScopeError::FileDecode {
                path: path.clone(),
                message: err.to_string(),
            }
        }
        other => RepoScopeError::HostRequest {
            operation: operation.to_string(),
            message: other.to_string(),
        },
    }
}
