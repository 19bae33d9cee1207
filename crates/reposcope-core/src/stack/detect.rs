//! Language, package-manager and developer-tool detection.

use std::collections::BTreeSet;
use std::path::Path;

use super::rules::Evidence;
use super::tables::DEV_TOOL_RULES;
use super::DependencyMap;

// ============================================================================
// Languages
// ============================================================================

/// Map a file extension (lowercase, no dot) to a language display name.
fn extension_to_language(ext: &str) -> Option<&'static str> {
    match ext {
        "ts" | "mts" | "cts" | "tsx" => Some("TypeScript"),
        "js" | "mjs" | "cjs" | "jsx" => Some("JavaScript"),
        "py" | "pyi" => Some("Python"),
        "go" => Some("Go"),
        "rs" => Some("Rust"),
        "rb" | "rake" => Some("Ruby"),
        "php" => Some("PHP"),
        "java" => Some("Java"),
        "kt" | "kts" => Some("Kotlin"),
        "c" | "h" => Some("C"),
        "cpp" | "cc" | "cxx" | "hpp" | "hh" => Some("C++"),
        "cs" => Some("C#"),
        "swift" => Some("Swift"),
        "dart" => Some("Dart"),
        "scala" => Some("Scala"),
        "ex" | "exs" => Some("Elixir"),
        "sh" | "bash" | "zsh" => Some("Shell"),
        "html" | "htm" => Some("HTML"),
        "css" | "scss" | "sass" | "less" => Some("CSS"),
        "sql" => Some("SQL"),
        "vue" => Some("Vue"),
        "svelte" => Some("Svelte"),
        "astro" => Some("Astro"),
        _ => None,
    }
}

/// Languages present across every scanned path, sorted and de-duplicated.
pub fn detect_languages(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|p| Path::new(p).extension().and_then(|e| e.to_str()))
        .filter_map(|ext| extension_to_language(&ext.to_ascii_lowercase()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

// ============================================================================
// Package Managers
// ============================================================================

/// Lockfile name to package manager, in reporting order.
/// For JavaScript: pnpm > yarn > bun > npm.
const LOCKFILE_MANAGERS: &[(&str, &str)] = &[
    ("pnpm-lock.yaml", "pnpm"),
    ("yarn.lock", "yarn"),
    ("bun.lockb", "bun"),
    ("bun.lock", "bun"),
    ("package-lock.json", "npm"),
    ("Cargo.lock", "cargo"),
    ("poetry.lock", "poetry"),
    ("Pipfile.lock", "pipenv"),
    ("uv.lock", "uv"),
    ("composer.lock", "composer"),
    ("go.sum", "go"),
    ("Gemfile.lock", "bundler"),
];

/// Manager used when a manifest is present without any lockfile of its
/// ecosystem.
const MANIFEST_MANAGERS: &[(&str, &str)] = &[
    ("package.json", "npm"),
    ("requirements.txt", "pip"),
    ("Gemfile", "bundler"),
    ("composer.json", "composer"),
    ("go.mod", "go"),
    ("Cargo.toml", "cargo"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManagerCategory {
    JavaScript,
    Rust,
    Python,
    Php,
    Go,
    Ruby,
}

fn manager_category(manager: &str) -> Option<ManagerCategory> {
    match manager {
        "npm" | "pnpm" | "yarn" | "bun" => Some(ManagerCategory::JavaScript),
        "cargo" => Some(ManagerCategory::Rust),
        "poetry" | "pipenv" | "uv" | "pip" => Some(ManagerCategory::Python),
        "composer" => Some(ManagerCategory::Php),
        "go" => Some(ManagerCategory::Go),
        "bundler" => Some(ManagerCategory::Ruby),
        _ => None,
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Package managers indicated by lockfiles anywhere in the tree.
///
/// A root-level manifest with no lockfile of its ecosystem falls back to the
/// ecosystem's default manager (`package.json` alone reports `npm`).
pub fn detect_package_managers(paths: &[String]) -> Vec<String> {
    let names: BTreeSet<&str> = paths.iter().map(|p| file_name(p)).collect();

    let mut managers: Vec<&'static str> = Vec::new();
    for (lockfile, manager) in LOCKFILE_MANAGERS {
        if names.contains(lockfile) && !managers.contains(manager) {
            managers.push(*manager);
        }
    }

    for (manifest, manager) in MANIFEST_MANAGERS {
        if !paths.iter().any(|p| p == manifest) {
            continue;
        }
        let category = manager_category(manager);
        let covered = managers.iter().any(|m| manager_category(m) == category);
        if !covered {
            managers.push(*manager);
        }
    }

    managers.into_iter().map(String::from).collect()
}

// ============================================================================
// Developer Tools
// ============================================================================

/// Developer tools implied by the dependency map, in table order.
pub fn detect_dev_tools(dependencies: &DependencyMap) -> Vec<String> {
    let configurations = Default::default();
    let evidence = Evidence::new(dependencies, &configurations, &[], &[]);
    evidence.collect(DEV_TOOL_RULES)
}
