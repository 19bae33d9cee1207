//! Common constants used throughout reposcope-core.
//!
//! Allow-lists that decide which files are fetched and which configuration
//! files are reported live here so the explorer and the analyzer agree.

// ============================================================================
// Directory Names
// ============================================================================

/// The name of the global reposcope configuration directory (`~/.reposcope/`).
pub const REPOSCOPE_HOME_DIR: &str = ".reposcope";

/// The name of the global configuration file.
pub const CONFIG_FILENAME: &str = "config.yaml";

// ============================================================================
// Ignored Directories
// ============================================================================

/// Directories skipped when walking a local checkout.
///
/// They hold VCS metadata, vendored dependencies or build output, none of
/// which appears in a hosted tree listing worth analyzing.
pub const ALWAYS_IGNORED_DIRS: &[&str] = &[
    ".git",
    "target",
    "node_modules",
    ".next",
    ".nuxt",
    ".svelte-kit",
    "dist",
    "build",
    "vendor",
    "__pycache__",
    ".venv",
    "venv",
    ".mypy_cache",
    ".pytest_cache",
    ".turbo",
];

/// Check if a directory name should always be ignored.
#[inline]
pub fn should_ignore_dir(name: &str) -> bool {
    ALWAYS_IGNORED_DIRS.contains(&name)
}

// ============================================================================
// File Allow-Lists
// ============================================================================

/// Configuration files reported in the configuration presence map.
///
/// Paths are repository-relative and matched exactly.
pub const CONFIG_FILES: &[&str] = &[
    "next.config.js",
    "next.config.mjs",
    "next.config.ts",
    "nuxt.config.ts",
    "vite.config.ts",
    "vite.config.js",
    "svelte.config.js",
    "angular.json",
    "tailwind.config.js",
    "tailwind.config.ts",
    "tsconfig.json",
    ".eslintrc.json",
    ".prettierrc",
    "jest.config.js",
    "Dockerfile",
    "docker-compose.yml",
    ".gitlab-ci.yml",
    "vercel.json",
    "netlify.toml",
    "firebase.json",
    "supabase/config.toml",
    "prisma/schema.prisma",
];

/// Dependency manifests and lockfiles, always fetched when present.
pub const MANIFEST_FILES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
    "requirements.txt",
    "Pipfile",
    "Pipfile.lock",
    "pyproject.toml",
    "poetry.lock",
    "Gemfile",
    "Gemfile.lock",
    "composer.json",
    "composer.lock",
    "go.mod",
    "go.sum",
    "Cargo.toml",
    "Cargo.lock",
];

/// Deployment and documentation files, always fetched when present.
pub const DEPLOYMENT_FILES: &[&str] = &[
    "README.md",
    ".env.example",
    "Procfile",
    "fly.toml",
    "render.yaml",
    "railway.json",
    "app.json",
    "serverless.yml",
];

/// Directories whose YAML files are all critical, whatever their names.
pub const WORKFLOW_DIRS: &[&str] = &[".github/workflows/"];

/// Every critical file, in the order the explorer fetches them.
pub fn critical_files() -> impl Iterator<Item = &'static str> {
    MANIFEST_FILES
        .iter()
        .chain(CONFIG_FILES)
        .chain(DEPLOYMENT_FILES)
        .copied()
}

/// A YAML file directly inside one of [`WORKFLOW_DIRS`].
pub fn is_workflow_file(path: &str) -> bool {
    WORKFLOW_DIRS.iter().any(|dir| {
        path.strip_prefix(dir).is_some_and(|name| {
            !name.contains('/') && (name.ends_with(".yml") || name.ends_with(".yaml"))
        })
    })
}

/// Check if a repository path is always fetched: an exact allow-list entry
/// or a workflow file.
pub fn is_critical_file(path: &str) -> bool {
    critical_files().any(|f| f == path) || is_workflow_file(path)
}

// ============================================================================
// Analysis
// ============================================================================

/// Characters of each configuration file kept as a preview.
pub const CONFIG_PREVIEW_CHARS: usize = 200;

/// Method label stamped into analysis metadata.
pub const ANALYSIS_METHOD: &str = "rule-based static analysis";

/// Stage names recorded in report metadata, in execution order.
pub const REPORT_STAGES: &[&str] = &["exploration", "categorization", "gap_analysis"];

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_should_ignore_dir() {
        assert!(should_ignore_dir(".git"));
        assert!(should_ignore_dir("node_modules"));
        assert!(should_ignore_dir("target"));
        assert!(!should_ignore_dir("src"));
        assert!(!should_ignore_dir(".github"));
    }

    #[test]
    fn test_critical_files_unique() {
        let all: Vec<_> = critical_files().collect();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn test_is_critical_file() {
        assert!(is_critical_file("package.json"));
        assert!(is_critical_file("tailwind.config.js"));
        assert!(is_critical_file("supabase/config.toml"));
        assert!(!is_critical_file("apps/web/package.json"));
        assert!(!is_critical_file("src/index.ts"));
    }

    #[test]
    fn test_any_workflow_name_is_critical() {
        assert!(is_critical_file(".github/workflows/release.yml"));
        assert!(is_critical_file(".github/workflows/deploy-preview.yaml"));
        assert!(!is_critical_file(".github/workflows/README.md"));
        assert!(!is_critical_file(".github/workflows/scripts/build.yml"));
        assert!(!is_critical_file(".github/dependabot.yml"));
    }
}
