//! Repository explorer.
//!
//! Turns a repository reference into an [`ExplorationResult`]: metadata, the
//! full file listing, the contents of a bounded set of important files and
//! the directory structure.
//!
//! ## File selection
//!
//! 1. Every file whose exact path is on the critical-file allow-list
//!    ([`crate::constants::critical_files`]) is selected, uncapped, followed
//!    by every CI workflow file.
//! 2. The remaining files are matched against [`PRIORITY_PATTERNS`], pattern
//!    by pattern and in tree order, until the depth's pattern cap is reached.
//!    Files already selected as critical are skipped and not counted.
//!
//! Metadata and tree failures abort exploration; a failed file fetch is
//! logged and the file is left out.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use chrono::Utc;
use rayon::prelude::*;
use regex::Regex;

use crate::budget::Deadline;
use crate::config::{ExplorationConfig, MAX_FETCH_CONCURRENCY};
use crate::constants::{critical_files, is_critical_file};
use crate::errors::RepoScopeError;
use crate::host::RepositoryHost;
use crate::repo_url::RepositoryRef;
use crate::types::{AnalysisDepth, ExplorationResult, FetchedFile, FileEntry};

// ============================================================================
// Selection Patterns
// ============================================================================

/// Path patterns for non-critical files worth fetching, in priority order.
pub const PRIORITY_PATTERNS: &[(&str, &str)] = &[
    (
        "config files",
        r"(^|/)[^/]+\.config\.(js|cjs|mjs|ts|cts|mts|json)$",
    ),
    ("environment examples", r"(^|/)([^/]*\.)?env\.example$"),
    ("SQL migrations", r"(^|/)(migrations?|migrate)/.+\.sql$"),
    (
        "source files",
        r"^(src|app|pages|lib|components|server|api)/.+\.(ts|tsx|js|jsx|mjs|py|rb|go|rs|php|vue|svelte)$",
    ),
];

static COMPILED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PRIORITY_PATTERNS
        .iter()
        .map(|(_, pattern)| Regex::new(pattern).expect("priority pattern is a valid regex"))
        .collect()
});

// ============================================================================
// Options
// ============================================================================

/// Knobs for one exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExploreOptions {
    /// Maximum number of pattern-matched (non-critical) files.
    pub pattern_cap: usize,
    /// Concurrent file fetches, clamped to 1-5.
    pub fetch_concurrency: usize,
}

impl ExploreOptions {
    pub fn for_depth(config: &ExplorationConfig, depth: AnalysisDepth) -> Self {
        Self {
            pattern_cap: config.cap_for(depth),
            fetch_concurrency: config.fetch_concurrency,
        }
    }
}

impl Default for ExploreOptions {
    fn default() -> Self {
        Self::for_depth(&ExplorationConfig::default(), AnalysisDepth::default())
    }
}

// ============================================================================
// Exploration
// ============================================================================

/// Explore `reference` through `host`.
///
/// # Errors
///
/// Fails when the metadata or tree request fails, or when `deadline` runs out.
pub fn explore<H: RepositoryHost + ?Sized>(
    host: &H,
    reference: &RepositoryRef,
    options: &ExploreOptions,
    deadline: &Deadline,
) -> Result<ExplorationResult, RepoScopeError> {
    deadline.check()?;
    let repository = host.repository(reference)?;
    tracing::debug!(
        "Fetched metadata for {} (default branch: {})",
        repository.full_name,
        repository.default_branch
    );

    deadline.check()?;
    let tree = host.tree(reference, &repository.default_branch)?;
    if tree.truncated {
        tracing::warn!(
            "File tree for {} was truncated by the host; analyzing {} listed files",
            reference,
            tree.entries.len()
        );
    }

    let selected = prioritize_files(&tree.entries, options.pattern_cap);
    tracing::info!(
        "Selected {} of {} files from {}",
        selected.len(),
        tree.entries.len(),
        reference
    );

    let files = fetch_files(
        host,
        reference,
        &repository.default_branch,
        &selected,
        options.fetch_concurrency,
        deadline,
    )?;

    Ok(ExplorationResult {
        repository,
        files,
        directories: directory_structure(&tree.entries),
        total_files_scanned: tree.entries.len(),
        scanned_paths: tree.entries.iter().map(|e| e.path.clone()).collect(),
        tree_truncated: tree.truncated,
        explored_at: Utc::now(),
    })
}

/// Select the files to fetch: all critical files plus up to `pattern_cap`
/// pattern matches.
pub fn prioritize_files(entries: &[FileEntry], pattern_cap: usize) -> Vec<FileEntry> {
    let by_path: HashMap<&str, &FileEntry> =
        entries.iter().map(|e| (e.path.as_str(), e)).collect();

    let mut selected: Vec<FileEntry> = Vec::new();
    let mut taken: HashSet<&str> = HashSet::new();

    for critical in critical_files() {
        if let Some(entry) = by_path.get(critical) {
            if taken.insert(critical) {
                selected.push((*entry).clone());
            }
        }
    }
    for entry in entries {
        if is_critical_file(&entry.path) && taken.insert(entry.path.as_str()) {
            selected.push(entry.clone());
        }
    }

    let mut pattern_matches = 0usize;
    'patterns: for pattern in COMPILED_PATTERNS.iter() {
        for entry in entries {
            if pattern_matches >= pattern_cap {
                break 'patterns;
            }
            if taken.contains(entry.path.as_str()) || !pattern.is_match(&entry.path) {
                continue;
            }
            taken.insert(entry.path.as_str());
            selected.push(entry.clone());
            pattern_matches += 1;
        }
    }

    selected
}

/// Fetch `selected` in order, dropping files whose fetch fails.
fn fetch_files<H: RepositoryHost + ?Sized>(
    host: &H,
    reference: &RepositoryRef,
    branch: &str,
    selected: &[FileEntry],
    concurrency: usize,
    deadline: &Deadline,
) -> Result<Vec<FetchedFile>, RepoScopeError> {
    let workers = concurrency.clamp(1, MAX_FETCH_CONCURRENCY);

    let results: Vec<Option<FetchedFile>> = if workers == 1 {
        selected
            .iter()
            .map(|entry| fetch_one(host, reference, branch, entry, deadline))
            .collect::<Result<_, _>>()?
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to start fetch pool: {}", e))?;
        pool.install(|| {
            selected
                .par_iter()
                .map(|entry| fetch_one(host, reference, branch, entry, deadline))
                .collect::<Result<_, _>>()
        })?
    };

    let files: Vec<FetchedFile> = results.into_iter().flatten().collect();
    tracing::debug!("Fetched {} of {} selected files", files.len(), selected.len());
    Ok(files)
}

/// `Ok(None)` when the host could not serve the file.
fn fetch_one<H: RepositoryHost + ?Sized>(
    host: &H,
    reference: &RepositoryRef,
    branch: &str,
    entry: &FileEntry,
    deadline: &Deadline,
) -> Result<Option<FetchedFile>, RepoScopeError> {
    deadline.check()?;
    match host.file_content(reference, &entry.path, branch) {
        Ok(file) => Ok(Some(FetchedFile {
            file_type: classify_file_type(&entry.path).to_string(),
            path: entry.path.clone(),
            content: file.content,
            size: file.size,
        })),
        Err(e) => {
            tracing::warn!("Skipping {}: {}", entry.path, e);
            Ok(None)
        }
    }
}

/// Every proper directory prefix of every path, sorted and de-duplicated.
pub fn directory_structure(entries: &[FileEntry]) -> Vec<String> {
    let mut directories = BTreeSet::new();
    for entry in entries {
        let mut end = 0;
        while let Some(offset) = entry.path[end..].find('/') {
            end += offset;
            directories.insert(entry.path[..end].to_string());
            end += 1;
        }
    }
    directories.into_iter().collect()
}

/// File-type label for a path (`text` when unknown).
pub fn classify_file_type(path: &str) -> &'static str {
    let file_name = path.rsplit('/').next().unwrap_or(path);

    match file_name {
        "Dockerfile" => return "dockerfile",
        "Makefile" => return "makefile",
        "Gemfile" | "Rakefile" => return "ruby",
        "Procfile" => return "procfile",
        "Jenkinsfile" => return "groovy",
        ".env.example" => return "env",
        _ => {}
    }

    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "ts" | "tsx" | "mts" | "cts" => "typescript",
        "js" | "jsx" | "mjs" | "cjs" => "javascript",
        "py" => "python",
        "rb" => "ruby",
        "go" => "go",
        "rs" => "rust",
        "php" => "php",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "swift" => "swift",
        "cs" => "csharp",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "dart" => "dart",
        "ex" | "exs" => "elixir",
        "vue" => "vue",
        "svelte" => "svelte",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" | "sass" => "scss",
        "less" => "less",
        "json" => "json",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        "xml" => "xml",
        "md" | "mdx" => "markdown",
        "sql" => "sql",
        "prisma" => "prisma",
        "graphql" | "gql" => "graphql",
        "sh" | "bash" | "zsh" => "shell",
        "tf" => "terraform",
        "lock" | "lockb" => "lockfile",
        "example" => "env",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use std::time::Duration;

    fn deadline() -> Deadline {
        Deadline::start(Duration::from_secs(60))
    }

    fn entries(paths: &[&str]) -> Vec<FileEntry> {
        paths.iter().map(|p| FileEntry::file(*p, 10)).collect()
    }

    #[test]
    fn test_cap_applies_to_patterns_only() {
        let mut tree: Vec<FileEntry> = (0..200)
            .map(|i| FileEntry::file(format!("src/components/Widget{:03}.tsx", i), 100))
            .collect();
        tree.extend(entries(&["package.json", "tsconfig.json", "Dockerfile"]));

        let selected = prioritize_files(&tree, 50);
        assert_eq!(selected.len(), 53);
        for critical in ["package.json", "tsconfig.json", "Dockerfile"] {
            assert!(selected.iter().any(|e| e.path == critical), "{}", critical);
        }
    }

    #[test]
    fn test_critical_files_survive_zero_cap() {
        let tree = entries(&["src/app.ts", "package.json", "lib/util.ts", "go.mod"]);
        let selected = prioritize_files(&tree, 0);
        let paths: Vec<_> = selected.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["package.json", "go.mod"]);
    }

    #[test]
    fn test_workflows_selected_whatever_their_name() {
        let tree = entries(&[
            "src/app.ts",
            ".github/workflows/release.yml",
            "package.json",
            ".github/workflows/lint.yaml",
        ]);
        let selected = prioritize_files(&tree, 0);
        let paths: Vec<_> = selected.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["package.json", ".github/workflows/release.yml", ".github/workflows/lint.yaml"]
        );
    }

    #[test]
    fn test_critical_file_matching_pattern_not_double_counted() {
        let tree = entries(&["next.config.js", "vitest.config.ts", "src/a.ts", "src/b.ts"]);
        let selected = prioritize_files(&tree, 2);
        let paths: Vec<_> = selected.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["next.config.js", "vitest.config.ts", "src/a.ts"]);
    }

    #[test]
    fn test_patterns_in_priority_order() {
        let tree = entries(&[
            "src/index.ts",
            "supabase/migrations/001_init.sql",
            "apps/web/.env.example",
            "apps/web/postcss.config.js",
            "docs/guide.md",
        ]);
        let selected = prioritize_files(&tree, 10);
        let paths: Vec<_> = selected.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "apps/web/postcss.config.js",
                "apps/web/.env.example",
                "supabase/migrations/001_init.sql",
                "src/index.ts",
            ]
        );
    }

    #[test]
    fn test_directory_structure() {
        let tree = entries(&["a/b/c.txt", "a/d.txt", "root.txt", "x/y/z/w.rs"]);
        assert_eq!(
            directory_structure(&tree),
            vec!["a", "a/b", "x", "x/y", "x/y/z"]
        );
    }

    #[test]
    fn test_classify_file_type() {
        assert_eq!(classify_file_type("src/App.tsx"), "typescript");
        assert_eq!(classify_file_type("Dockerfile"), "dockerfile");
        assert_eq!(classify_file_type("db/schema.SQL"), "sql");
        assert_eq!(classify_file_type("LICENSE"), "text");
        assert_eq!(classify_file_type("notes.weird"), "text");
    }

    #[test]
    fn test_explore_skips_failed_files() {
        let reference = RepositoryRef::new("acme", "web");
        let host = MemoryHost::new(&reference)
            .with_file("package.json", r#"{"dependencies":{"react":"18.3.1"}}"#)
            .with_file("tsconfig.json", "{}")
            .with_file("src/index.ts", "export {}")
            .with_failing_file("tsconfig.json")
            .with_listed_file("assets/logo.png", 4096);

        let result = explore(&host, &reference, &ExploreOptions::default(), &deadline()).unwrap();

        let paths: Vec<_> = result.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["package.json", "src/index.ts"]);
        assert_eq!(result.total_files_scanned, 4);
        assert_eq!(result.scanned_paths.len(), 4);
        assert_eq!(result.directories, vec!["assets", "src"]);
        assert_eq!(result.files[0].file_type, "json");
        assert!(!result.tree_truncated);
    }

    #[test]
    fn test_explore_parallel_preserves_order() {
        let reference = RepositoryRef::new("acme", "web");
        let mut host = MemoryHost::new(&reference).with_fetch_delay(Duration::from_millis(2));
        for i in 0..20 {
            host = host.with_file(format!("src/module{:02}.ts", i), "export {}");
        }
        host = host.with_file("package.json", "{}");

        let sequential = explore(
            &host,
            &reference,
            &ExploreOptions {
                pattern_cap: 50,
                fetch_concurrency: 1,
            },
            &deadline(),
        )
        .unwrap();
        let parallel = explore(
            &host,
            &reference,
            &ExploreOptions {
                pattern_cap: 50,
                fetch_concurrency: 4,
            },
            &deadline(),
        )
        .unwrap();

        let order = |r: &ExplorationResult| r.files.iter().map(|f| f.path.clone()).collect::<Vec<_>>();
        assert_eq!(order(&sequential), order(&parallel));
        assert_eq!(parallel.files.len(), 21);
        assert_eq!(parallel.files[0].path, "package.json");
    }

    #[test]
    fn test_explore_metadata_failure_is_fatal() {
        let reference = RepositoryRef::new("acme", "web");
        let host = MemoryHost::new(&reference).with_metadata_failure("404 Not Found");
        let err = explore(&host, &reference, &ExploreOptions::default(), &deadline()).unwrap_err();
        assert!(matches!(err, RepoScopeError::HostRequest { .. }));
    }

    #[test]
    fn test_explore_tree_failure_is_fatal() {
        let reference = RepositoryRef::new("acme", "web");
        let host = MemoryHost::new(&reference).with_tree_failure("502 Bad Gateway");
        assert!(explore(&host, &reference, &ExploreOptions::default(), &deadline()).is_err());
    }

    #[test]
    fn test_explore_truncated_tree_proceeds() {
        let reference = RepositoryRef::new("acme", "web");
        let host = MemoryHost::new(&reference)
            .with_file("package.json", "{}")
            .truncated();
        let result = explore(&host, &reference, &ExploreOptions::default(), &deadline()).unwrap();
        assert!(result.tree_truncated);
        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn test_explore_expired_budget() {
        let reference = RepositoryRef::new("acme", "web");
        let host = MemoryHost::new(&reference).with_file("package.json", "{}");
        let expired = Deadline::start(Duration::ZERO);
        let err = explore(&host, &reference, &ExploreOptions::default(), &expired).unwrap_err();
        assert!(matches!(err, RepoScopeError::BudgetExceeded { .. }));
        assert_eq!(host.fetch_count(), 0);
    }
}
