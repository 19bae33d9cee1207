//! Common types used throughout reposcope.
//!
//! This module contains the exploration-side data model and the category
//! vocabulary shared by the analyzer, the gap engine and the report.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::RepoScopeError;

// ============================================================================
// AnalysisDepth
// ============================================================================

/// How many pattern-matched files the explorer may fetch.
///
/// Depth only changes the pattern cap; critical files are always fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisDepth {
    Basic,
    Standard,
    #[default]
    Comprehensive,
}

impl AnalysisDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Comprehensive => "comprehensive",
        }
    }
}

impl std::fmt::Display for AnalysisDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnalysisDepth {
    type Err = RepoScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "standard" => Ok(Self::Standard),
            "comprehensive" => Ok(Self::Comprehensive),
            other => Err(RepoScopeError::InvalidArgument(format!(
                "Unknown analysis depth `{}`. Valid values: basic, standard, comprehensive",
                other
            ))),
        }
    }
}

// ============================================================================
// Exploration
// ============================================================================

/// Repository metadata as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    /// `owner/repo`.
    pub full_name: String,
    pub description: Option<String>,
    /// Primary language as reported by the host.
    pub language: Option<String>,
    /// Size in KB.
    pub size_kb: u64,
    /// RFC 3339 timestamp of the last update, when known.
    pub updated_at: Option<String>,
    pub default_branch: String,
}

/// Kind of a tree entry. Only files survive filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
}

/// One file from the recursive tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Repository-relative path, `/`-separated.
    pub path: String,
    pub kind: FileKind,
    /// Size in bytes.
    pub size: u64,
}

impl FileEntry {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            kind: FileKind::File,
            size,
        }
    }
}

/// Full file listing of a branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryTree {
    pub entries: Vec<FileEntry>,
    /// The host cut the listing short.
    pub truncated: bool,
}

/// A fetched and decoded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedFile {
    pub path: String,
    pub content: String,
    pub size: u64,
    /// Label from the extension table (`text` when unknown).
    pub file_type: String,
}

/// Output of the explorer. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationResult {
    pub repository: RepositoryInfo,
    /// Fetched files, in selection order.
    pub files: Vec<FetchedFile>,
    /// Every proper directory prefix of every scanned path, sorted.
    pub directories: Vec<String>,
    /// Number of files in the tree listing.
    pub total_files_scanned: usize,
    /// Every file path in the tree listing, fetched or not.
    pub scanned_paths: Vec<String>,
    pub tree_truncated: bool,
    pub explored_at: DateTime<Utc>,
}

// ============================================================================
// Categories
// ============================================================================

/// The eight fixed technology categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Frontend,
    Backend,
    Database,
    Infrastructure,
    Platforms,
    Ai,
    Development,
    Integrations,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Frontend,
        Category::Backend,
        Category::Database,
        Category::Infrastructure,
        Category::Platforms,
        Category::Ai,
        Category::Development,
        Category::Integrations,
    ];

    /// Serialized key, e.g. `ai`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Database => "database",
            Self::Infrastructure => "infrastructure",
            Self::Platforms => "platforms",
            Self::Ai => "ai",
            Self::Development => "development",
            Self::Integrations => "integrations",
        }
    }

    /// Human label, e.g. `AI`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Database => "Database",
            Self::Infrastructure => "Infrastructure",
            Self::Platforms => "Platforms",
            Self::Ai => "AI",
            Self::Development => "Development",
            Self::Integrations => "Integrations",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Technologies per category, always carrying all eight keys.
///
/// Entries are `Name-Version` identifiers or fixed labels, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechnologyCategoryMap(BTreeMap<Category, Vec<String>>);

impl Default for TechnologyCategoryMap {
    fn default() -> Self {
        Self(Category::ALL.iter().map(|c| (*c, Vec::new())).collect())
    }
}

impl TechnologyCategoryMap {
    /// Technologies in `category` (empty when nothing was detected).
    pub fn get(&self, category: Category) -> &[String] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append an entry unless the exact string is already present.
    pub fn push(&mut self, category: Category, technology: impl Into<String>) {
        let technology = technology.into();
        let list = self.0.entry(category).or_default();
        if !list.contains(&technology) {
            list.push(technology);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.0.iter().map(|(c, techs)| (*c, techs.as_slice()))
    }

    /// Total entries across all categories (cross-category duplicates count).
    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

/// Priority tier used by gap analyses and strategic recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
