//! Dependency manifest parsers.
//!
//! Each parser takes the manifest text and returns `(name, version)` pairs
//! with the version exactly as declared. Only root-level manifests are read.
//! Parsers for structured formats (JSON, TOML) fail on malformed input; the
//! line-based ones skip lines they do not understand.

use std::sync::LazyLock;

use regex::Regex;

use super::DependencyMap;
use crate::errors::RepoScopeError;
use crate::types::FetchedFile;

type ParseFn = fn(&str) -> Result<Vec<(String, String)>, String>;

/// A recognized manifest file.
pub struct ManifestFormat {
    pub file_name: &'static str,
    pub ecosystem: &'static str,
    parse: ParseFn,
}

/// Manifests in merge order; later manifests win on name collisions.
pub const MANIFESTS: &[ManifestFormat] = &[
    ManifestFormat {
        file_name: "package.json",
        ecosystem: "javascript",
        parse: parse_package_json,
    },
    ManifestFormat {
        file_name: "requirements.txt",
        ecosystem: "python",
        parse: parse_requirements_txt,
    },
    ManifestFormat {
        file_name: "Gemfile",
        ecosystem: "ruby",
        parse: parse_gemfile,
    },
    ManifestFormat {
        file_name: "composer.json",
        ecosystem: "php",
        parse: parse_composer_json,
    },
    ManifestFormat {
        file_name: "go.mod",
        ecosystem: "go",
        parse: parse_go_mod,
    },
    ManifestFormat {
        file_name: "Cargo.toml",
        ecosystem: "rust",
        parse: parse_cargo_toml,
    },
];

impl ManifestFormat {
    /// Parse `content`, mapping failures to [`RepoScopeError::ManifestParse`].
    pub fn parse(&self, content: &str) -> Result<Vec<(String, String)>, RepoScopeError> {
        (self.parse)(content).map_err(|message| RepoScopeError::ManifestParse {
            manifest: self.file_name.to_string(),
            message,
        })
    }
}

/// Merge every recognized root-level manifest into one dependency map.
///
/// A manifest that fails to parse is logged and contributes nothing.
pub fn extract_dependencies(files: &[FetchedFile]) -> DependencyMap {
    let mut dependencies = DependencyMap::new();

    for format in MANIFESTS {
        let Some(file) = files.iter().find(|f| f.path == format.file_name) else {
            continue;
        };

        match format.parse(&file.content) {
            Ok(entries) => {
                tracing::debug!(
                    "Parsed {} {} dependencies from {}",
                    entries.len(),
                    format.ecosystem,
                    format.file_name
                );
                dependencies.extend(entries);
            }
            Err(e) => tracing::warn!("{}; ignoring manifest", e),
        }
    }

    dependencies
}

// ============================================================================
// JavaScript
// ============================================================================

/// `dependencies`, `devDependencies`, `peerDependencies`, in that order.
fn parse_package_json(content: &str) -> Result<Vec<(String, String)>, String> {
    let json: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;

    let mut deps = Vec::new();
    for section in ["dependencies", "devDependencies", "peerDependencies"] {
        if let Some(entries) = json.get(section).and_then(|v| v.as_object()) {
            for (name, version) in entries {
                deps.push((name.clone(), version.as_str().unwrap_or("*").to_string()));
            }
        }
    }

    Ok(deps)
}

// ============================================================================
// Python
// ============================================================================

static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9][A-Za-z0-9._-]*)(?:\[[^\]]*\])?\s*(.*)$")
        .expect("requirement regex is valid")
});

/// `name[extras] specifier ; markers  # comment`
fn parse_requirements_txt(content: &str) -> Result<Vec<(String, String)>, String> {
    let mut deps = Vec::new();

    for line in content.lines() {
        let line = line.split(" #").next().unwrap_or("").trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        if line.contains("://") || line.starts_with('.') || line.starts_with('/') {
            continue;
        }

        if let Some(caps) = REQUIREMENT_RE.captures(line) {
            let name = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let spec = caps
                .get(2)
                .map(|m| m.as_str().split(';').next().unwrap_or("").trim())
                .unwrap_or("");
            deps.push((
                name.to_string(),
                if spec.is_empty() { "*" } else { spec }.to_string(),
            ));
        }
    }

    Ok(deps)
}

// ============================================================================
// Ruby
// ============================================================================

static GEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*gem\s+['"]([^'"]+)['"](?:\s*,\s*['"]([^'"]+)['"])?"#)
        .expect("gem regex is valid")
});

fn parse_gemfile(content: &str) -> Result<Vec<(String, String)>, String> {
    let deps = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| GEM_RE.captures(line))
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_string();
            let version = caps.get(2).map(|m| m.as_str()).unwrap_or("*").to_string();
            Some((name, version))
        })
        .collect();

    Ok(deps)
}

// ============================================================================
// PHP
// ============================================================================

/// `require` then `require-dev`; platform requirements are skipped.
fn parse_composer_json(content: &str) -> Result<Vec<(String, String)>, String> {
    let json: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;

    let mut deps = Vec::new();
    for section in ["require", "require-dev"] {
        if let Some(entries) = json.get(section).and_then(|v| v.as_object()) {
            for (name, version) in entries {
                if name == "php" || name.starts_with("ext-") || name.starts_with("lib-") {
                    continue;
                }
                deps.push((name.clone(), version.as_str().unwrap_or("*").to_string()));
            }
        }
    }

    Ok(deps)
}

// ============================================================================
// Go
// ============================================================================

static GO_REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:require\s+)?([^\s()]+)\s+v?([^\s]+)(?:\s*//.*)?$")
        .expect("go require regex is valid")
});

/// Single-line `require` directives and `require ( ... )` blocks.
fn parse_go_mod(content: &str) -> Result<Vec<(String, String)>, String> {
    let mut deps = Vec::new();
    let mut in_require_block = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if line.starts_with("require (") || line == "require(" {
            in_require_block = true;
            continue;
        }
        if line == ")" {
            in_require_block = false;
            continue;
        }

        if in_require_block || line.starts_with("require ") {
            if let Some(caps) = GO_REQUIRE_RE.captures(line) {
                let name = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                let version = caps.get(2).map(|m| m.as_str()).unwrap_or("*");
                if !name.is_empty() {
                    deps.push((name.to_string(), version.to_string()));
                }
            }
        }
    }

    Ok(deps)
}

// ============================================================================
// Rust
// ============================================================================

const CARGO_SECTIONS: &[&str] = &["dependencies", "dev-dependencies", "build-dependencies"];

/// Regular, dev, build and target-specific sections, then
/// `[workspace.dependencies]`.
fn parse_cargo_toml(content: &str) -> Result<Vec<(String, String)>, String> {
    let parsed: toml::Value = toml::from_str(content).map_err(|e| e.to_string())?;

    let mut deps = Vec::new();
    let mut push_section = |table: Option<&toml::Value>| {
        if let Some(section) = table.and_then(|v| v.as_table()) {
            for (name, value) in section {
                deps.push((name.clone(), extract_cargo_version(value)));
            }
        }
    };

    for section in CARGO_SECTIONS {
        push_section(parsed.get(*section));
    }

    if let Some(targets) = parsed.get("target").and_then(|v| v.as_table()) {
        for target in targets.values() {
            for section in CARGO_SECTIONS {
                push_section(target.get(*section));
            }
        }
    }

    push_section(parsed.get("workspace").and_then(|w| w.get("dependencies")));

    Ok(deps)
}

/// `"1.0"` and `{ version = "1.0" }` yield the version; workspace, path and
/// git dependencies yield `*`.
fn extract_cargo_version(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(t) => t
            .get("version")
            .and_then(|v| v.as_str())
            .unwrap_or("*")
            .to_string(),
        _ => "*".to_string(),
    }
}
