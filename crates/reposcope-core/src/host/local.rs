use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use ignore::WalkBuilder;

use super::{RemoteFile, RepositoryHost};
use crate::constants::should_ignore_dir;
use crate::errors::RepoScopeError;
use crate::repo_url::RepositoryRef;
use crate::types::{FileEntry, RepositoryInfo, RepositoryTree};

/// Owner reported for local checkouts.
pub const LOCAL_OWNER: &str = "local";

/// [`RepositoryHost`] over a directory on disk.
///
/// The walk respects `.gitignore` but keeps dotfiles such as
/// `.github/workflows/*` and `.env.example`, which matter for detection.
#[derive(Debug, Clone)]
pub struct LocalHost {
    root: PathBuf,
    name: String,
}

impl LocalHost {
    /// Open a checkout rooted at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RepoScopeError::PathNotFound`] if `path` does not exist and
    /// [`RepoScopeError::InvalidPath`] if it is not a directory.
    pub fn open(path: &Path) -> Result<Self, RepoScopeError> {
        if !path.exists() {
            return Err(RepoScopeError::PathNotFound(path.display().to_string()));
        }
        if !path.is_dir() {
            return Err(RepoScopeError::InvalidPath(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let root = path.canonicalize()?;
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "repository".to_string());

        Ok(Self { root, name })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `local/<dir-name>` pair this checkout is reported under.
    pub fn reference(&self) -> RepositoryRef {
        RepositoryRef::new(LOCAL_OWNER, &self.name)
    }

    /// Walk the checkout, returning `(relative path, size)` sorted by path.
    fn walk(&self) -> Result<Vec<FileEntry>, RepoScopeError> {
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .require_git(false)
            .follow_links(false)
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                !should_ignore_dir(&name)
            })
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(e) => {
                    if let Some(io_err) = e.io_error() {
                        if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                            tracing::debug!("Skipping entry due to permission denied: {}", e);
                            continue;
                        }
                    }
                    return Err(RepoScopeError::Other(anyhow::anyhow!(
                        "Failed to walk {}: {}",
                        self.root.display(),
                        e
                    )));
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let path = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

            entries.push(FileEntry::file(path, size));
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    /// Branch named by `.git/HEAD`, or `HEAD` when detached or not a repo.
    fn current_branch(&self) -> String {
        fs::read_to_string(self.root.join(".git").join("HEAD"))
            .ok()
            .and_then(|head| {
                head.trim()
                    .strip_prefix("ref: refs/heads/")
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "HEAD".to_string())
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, RepoScopeError> {
        let relative = Path::new(path);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(RepoScopeError::InvalidPath(format!(
                "{} is not a repository-relative path",
                path
            )));
        }
        Ok(self.root.join(relative))
    }
}

impl RepositoryHost for LocalHost {
    fn repository(&self, _reference: &RepositoryRef) -> Result<RepositoryInfo, RepoScopeError> {
        let total_bytes: u64 = self.walk()?.iter().map(|e| e.size).sum();
        let updated_at = fs::metadata(&self.root)
            .and_then(|m| m.modified())
            .ok()
            .map(|t| DateTime::<Utc>::from(t).to_rfc3339());

        Ok(RepositoryInfo {
            name: self.name.clone(),
            full_name: self.reference().full_name(),
            description: None,
            language: None,
            size_kb: total_bytes.div_ceil(1024),
            updated_at,
            default_branch: self.current_branch(),
        })
    }

    fn tree(
        &self,
        _reference: &RepositoryRef,
        _branch: &str,
    ) -> Result<RepositoryTree, RepoScopeError> {
        Ok(RepositoryTree {
            entries: self.walk()?,
            truncated: false,
        })
    }

    fn file_content(
        &self,
        _reference: &RepositoryRef,
        path: &str,
        _branch: &str,
    ) -> Result<RemoteFile, RepoScopeError> {
        let full_path = self.resolve(path)?;
        let bytes = fs::read(&full_path)?;
        let size = bytes.len() as u64;
        let content = String::from_utf8(bytes).map_err(|e| RepoScopeError::FileDecode {
            path: path.to_string(),
            message: format!("content is not UTF-8: {}", e),
        })?;
        Ok(RemoteFile { content, size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn checkout() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join(".github/workflows")).unwrap();
        fs::create_dir_all(root.join("node_modules/react")).unwrap();
        fs::write(root.join("package.json"), r#"{"dependencies":{"react":"18.3.1"}}"#).unwrap();
        fs::write(root.join("src/index.ts"), "export {}\n").unwrap();
        fs::write(root.join(".github/workflows/ci.yml"), "on: push\n").unwrap();
        fs::write(root.join("node_modules/react/index.js"), "module.exports = {}\n").unwrap();
        fs::write(root.join(".gitignore"), "secret.txt\n").unwrap();
        fs::write(root.join("secret.txt"), "hidden\n").unwrap();
        temp
    }

    #[test]
    fn test_tree_skips_ignored_and_keeps_dotfiles() {
        let temp = checkout();
        let host = LocalHost::open(temp.path()).unwrap();
        let tree = host.tree(&host.reference(), "HEAD").unwrap();
        let paths: Vec<_> = tree.entries.iter().map(|e| e.path.as_str()).collect();

        assert!(paths.contains(&"package.json"));
        assert!(paths.contains(&"src/index.ts"));
        assert!(paths.contains(&".github/workflows/ci.yml"));
        assert!(!paths.iter().any(|p| p.starts_with("node_modules")));
        assert!(!paths.contains(&"secret.txt"));
        assert!(!tree.truncated);

        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn test_repository_info() {
        let temp = checkout();
        let host = LocalHost::open(temp.path()).unwrap();
        let info = host.repository(&host.reference()).unwrap();

        assert_eq!(info.full_name, format!("local/{}", info.name));
        assert_eq!(info.default_branch, "HEAD");
        assert!(info.size_kb >= 1);
    }

    #[test]
    fn test_current_branch_from_git_head() {
        let temp = checkout();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join(".git/HEAD"), "ref: refs/heads/develop\n").unwrap();

        let host = LocalHost::open(temp.path()).unwrap();
        assert_eq!(host.current_branch(), "develop");
    }

    #[test]
    fn test_file_content() {
        let temp = checkout();
        let host = LocalHost::open(temp.path()).unwrap();
        let file = host
            .file_content(&host.reference(), "src/index.ts", "HEAD")
            .unwrap();
        assert_eq!(file.content, "export {}\n");
        assert_eq!(file.size, 10);
    }

    #[test]
    fn test_file_content_rejects_escaping_paths() {
        let temp = checkout();
        let host = LocalHost::open(temp.path()).unwrap();
        let err = host
            .file_content(&host.reference(), "../etc/passwd", "HEAD")
            .unwrap_err();
        assert!(matches!(err, RepoScopeError::InvalidPath(_)));
    }

    #[test]
    fn test_open_missing_and_file_paths() {
        let temp = checkout();
        assert!(matches!(
            LocalHost::open(&temp.path().join("missing")),
            Err(RepoScopeError::PathNotFound(_))
        ));
        assert!(matches!(
            LocalHost::open(&temp.path().join("package.json")),
            Err(RepoScopeError::InvalidPath(_))
        ));
    }
}
