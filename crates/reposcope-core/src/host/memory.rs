use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{RemoteFile, RepositoryHost};
use crate::errors::RepoScopeError;
use crate::repo_url::RepositoryRef;
use crate::types::{FileEntry, RepositoryInfo, RepositoryTree};

/// [`RepositoryHost`] serving a repository snapshot held in memory.
///
/// Useful for analyzing content obtained elsewhere and for exercising the
/// pipeline without a network. Failure injection covers the error paths the
/// explorer must tolerate.
#[derive(Debug)]
pub struct MemoryHost {
    info: RepositoryInfo,
    files: BTreeMap<String, String>,
    listed_only: BTreeMap<String, u64>,
    failing: HashSet<String>,
    metadata_failure: Option<String>,
    tree_failure: Option<String>,
    truncated: bool,
    fetch_delay: Option<Duration>,
    fetches: AtomicUsize,
}

impl MemoryHost {
    /// An empty repository `owner/repo` on branch `main`.
    pub fn new(reference: &RepositoryRef) -> Self {
        Self {
            info: RepositoryInfo {
                name: reference.repo.clone(),
                full_name: reference.full_name(),
                description: None,
                language: None,
                size_kb: 0,
                updated_at: None,
                default_branch: "main".to_string(),
            },
            files: BTreeMap::new(),
            listed_only: BTreeMap::new(),
            failing: HashSet::new(),
            metadata_failure: None,
            tree_failure: None,
            truncated: false,
            fetch_delay: None,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Add a file with content.
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// List a file in the tree without content; fetching it fails.
    pub fn with_listed_file(mut self, path: impl Into<String>, size: u64) -> Self {
        self.listed_only.insert(path.into(), size);
        self
    }

    /// Make content fetches for `path` fail.
    pub fn with_failing_file(mut self, path: impl Into<String>) -> Self {
        self.failing.insert(path.into());
        self
    }

    /// Make the metadata request fail with `message`.
    pub fn with_metadata_failure(mut self, message: impl Into<String>) -> Self {
        self.metadata_failure = Some(message.into());
        self
    }

    /// Make the tree request fail with `message`.
    pub fn with_tree_failure(mut self, message: impl Into<String>) -> Self {
        self.tree_failure = Some(message.into());
        self
    }

    /// Report the tree listing as truncated.
    pub fn truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    /// Sleep this long before serving each file.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.info.description = Some(description.into());
        self
    }

    /// Number of content fetches attempted so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl RepositoryHost for MemoryHost {
    fn repository(&self, _reference: &RepositoryRef) -> Result<RepositoryInfo, RepoScopeError> {
        if let Some(message) = &self.metadata_failure {
            return Err(RepoScopeError::HostRequest {
                operation: "repository metadata".to_string(),
                message: message.clone(),
            });
        }
        let mut info = self.info.clone();
        let bytes: usize = self.files.values().map(String::len).sum();
        info.size_kb = (bytes as u64).div_ceil(1024);
        Ok(info)
    }

    fn tree(
        &self,
        _reference: &RepositoryRef,
        _branch: &str,
    ) -> Result<RepositoryTree, RepoScopeError> {
        if let Some(message) = &self.tree_failure {
            return Err(RepoScopeError::HostRequest {
                operation: "file tree".to_string(),
                message: message.clone(),
            });
        }

        let mut entries: Vec<FileEntry> = self
            .files
            .iter()
            .map(|(path, content)| FileEntry::file(path.clone(), content.len() as u64))
            .chain(
                self.listed_only
                    .iter()
                    .filter(|(path, _)| !self.files.contains_key(*path))
                    .map(|(path, size)| FileEntry::file(path.clone(), *size)),
            )
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(RepositoryTree {
            entries,
            truncated: self.truncated,
        })
    }

    fn file_content(
        &self,
        _reference: &RepositoryRef,
        path: &str,
        _branch: &str,
    ) -> Result<RemoteFile, RepoScopeError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.fetch_delay {
            std::thread::sleep(delay);
        }

        if self.failing.contains(path) {
            return Err(RepoScopeError::HostRequest {
                operation: "file content".to_string(),
                message: format!("injected failure for {}", path),
            });
        }

        match self.files.get(path) {
            Some(content) => Ok(RemoteFile {
                content: content.clone(),
                size: content.len() as u64,
            }),
            None => Err(RepoScopeError::HostRequest {
                operation: "file content".to_string(),
                message: format!("{} has no content in this snapshot", path),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_lists_files_and_listed_paths() {
        let reference = RepositoryRef::new("acme", "web");
        let host = MemoryHost::new(&reference)
            .with_file("package.json", "{}")
            .with_listed_file("assets/logo.png", 2048)
            .truncated();

        let tree = host.tree(&reference, "main").unwrap();
        assert!(tree.truncated);
        assert_eq!(
            tree.entries,
            vec![
                FileEntry::file("assets/logo.png", 2048),
                FileEntry::file("package.json", 2),
            ]
        );
    }

    #[test]
    fn test_failure_injection() {
        let reference = RepositoryRef::new("acme", "web");
        let host = MemoryHost::new(&reference)
            .with_file("a.ts", "x")
            .with_failing_file("a.ts");

        assert!(host.file_content(&reference, "a.ts", "main").is_err());
        assert!(host.file_content(&reference, "missing.ts", "main").is_err());
        assert_eq!(host.fetch_count(), 2);

        let broken = MemoryHost::new(&reference).with_metadata_failure("boom");
        assert!(broken.repository(&reference).is_err());
    }
}
