//! Wire models for the subset of the GitHub REST API used by reposcope.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;

use crate::GitHubError;

/// `GET /repos/{owner}/{repo}`
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryResponse {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Repository size in KB.
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub default_branch: String,
}

/// `GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1`
#[derive(Debug, Clone, Deserialize)]
pub struct TreeResponse {
    #[serde(default)]
    pub sha: String,
    /// Set when the listing exceeded the API's entry limit.
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    /// `blob`, `tree` or `commit` (submodule).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub size: Option<u64>,
}

impl TreeEntry {
    pub fn is_blob(&self) -> bool {
        self.kind == "blob"
    }
}

/// `GET /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Clone, Deserialize)]
pub struct ContentResponse {
    pub path: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// A decoded text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub path: String,
    pub content: String,
    pub size: u64,
}

impl ContentResponse {
    /// Decode the inline content into UTF-8 text.
    ///
    /// GitHub wraps base64 payloads at 60 columns, so whitespace is stripped
    /// before decoding. Files above the API's inline limit come back with an
    /// empty `content` and encoding `none`.
    pub fn decode(self) -> Result<FileContent, GitHubError> {
        let encoding = self.encoding.unwrap_or_else(|| "none".to_string());
        let raw = match self.content {
            Some(raw) if !raw.is_empty() || self.size == 0 => raw,
            _ => {
                return Err(GitHubError::MissingContent {
                    path: self.path,
                    encoding,
                })
            }
        };

        let content = match encoding.as_str() {
            "base64" => {
                let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
                let bytes = STANDARD.decode(compact).map_err(|e| GitHubError::Decode {
                    url: self.path.clone(),
                    message: format!("invalid base64: {}", e),
                })?;
                String::from_utf8(bytes).map_err(|e| GitHubError::Decode {
                    url: self.path.clone(),
                    message: format!("content is not UTF-8: {}", e),
                })?
            }
            "utf-8" | "utf8" => raw,
            other => {
                return Err(GitHubError::MissingContent {
                    path: self.path,
                    encoding: other.to_string(),
                })
            }
        };

        Ok(FileContent {
            path: self.path,
            content,
            size: self.size,
        })
    }
}
