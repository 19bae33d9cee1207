//! Declarative detection rules and the runner that evaluates them.
//!
//! A [`Rule`] pairs a [`Predicate`] over the collected evidence with an
//! [`Effect`] producing the technology string. Tables of rules are evaluated
//! in order; every matching rule contributes.

use std::collections::{HashMap, HashSet};

use super::{ConfigurationPresenceMap, DependencyMap};

/// A condition over the evidence gathered from one exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// A dependency with this exact name (case-insensitive).
    Dependency(&'static str),
    /// Any dependency whose name starts with this prefix.
    DependencyPrefix(&'static str),
    /// An allow-listed configuration file that exists.
    Config(&'static str),
    /// A directory present in the tree.
    Directory(&'static str),
    /// A file path present in the tree (fetched or not).
    Path(&'static str),
    /// Any file path ending with this suffix.
    PathSuffix(&'static str),
}

/// What a matching rule contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// `Name-Version`, version taken from the matched dependency
    /// (`latest` when there is none).
    Versioned(&'static str),
    /// A fixed label.
    Label(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub when: Predicate,
    pub then: Effect,
}

/// Shorthand for rule tables.
pub const fn rule(when: Predicate, then: Effect) -> Rule {
    Rule { when, then }
}

/// Indexed view of everything the rules can test.
pub struct Evidence<'a> {
    dependencies: HashMap<String, &'a str>,
    configurations: &'a ConfigurationPresenceMap,
    directories: HashSet<&'a str>,
    paths: HashSet<&'a str>,
}

impl<'a> Evidence<'a> {
    pub fn new(
        dependencies: &'a DependencyMap,
        configurations: &'a ConfigurationPresenceMap,
        directories: &'a [String],
        paths: &'a [String],
    ) -> Self {
        Self {
            dependencies: dependencies
                .iter()
                .map(|(name, version)| (name.to_lowercase(), version.as_str()))
                .collect(),
            configurations,
            directories: directories.iter().map(String::as_str).collect(),
            paths: paths.iter().map(String::as_str).collect(),
        }
    }

    /// `None` when the predicate does not hold, otherwise the declared
    /// version of the matched dependency (if any).
    fn resolve(&self, predicate: &Predicate) -> Option<Option<&'a str>> {
        match predicate {
            Predicate::Dependency(name) => self.dependencies.get(*name).map(|v| Some(*v)),
            Predicate::DependencyPrefix(prefix) => self
                .dependencies
                .iter()
                .filter(|(name, _)| name.starts_with(*prefix))
                .min_by(|a, b| a.0.cmp(b.0))
                .map(|(_, version)| Some(*version)),
            Predicate::Config(name) => self
                .configurations
                .get(*name)
                .filter(|c| c.exists)
                .map(|_| None),
            Predicate::Directory(dir) => self.directories.contains(*dir).then_some(None),
            Predicate::Path(path) => self.paths.contains(*path).then_some(None),
            Predicate::PathSuffix(suffix) => {
                self.paths.iter().any(|p| p.ends_with(*suffix)).then_some(None)
            }
        }
    }

    /// Whether the predicate holds.
    pub fn holds(&self, predicate: &Predicate) -> bool {
        self.resolve(predicate).is_some()
    }

    /// The string a rule contributes, if its predicate holds.
    pub fn apply(&self, rule: &Rule) -> Option<String> {
        let version = self.resolve(&rule.when)?;
        Some(match rule.then {
            Effect::Versioned(name) => format!("{}-{}", name, normalize_version(version)),
            Effect::Label(label) => label.to_string(),
        })
    }

    /// Evaluate `rules` in order, keeping the first occurrence of each result.
    pub fn collect(&self, rules: &[Rule]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for result in rules.iter().filter_map(|r| self.apply(r)) {
            if !out.contains(&result) {
                out.push(result);
            }
        }
        out
    }
}

/// Reduce a declared version to a bare version number.
///
/// Range operators (`^ ~ = > < !`) and whitespace are stripped from the
/// front, and anything after the first `,` or space is dropped. Empty,
/// `*` and `latest` become `latest`.
pub fn normalize_version(declared: Option<&str>) -> String {
    let trimmed = declared
        .unwrap_or("")
        .trim()
        .trim_start_matches(|c: char| matches!(c, '^' | '~' | '=' | '>' | '<' | '!') || c.is_whitespace());
    let version = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .next()
        .unwrap_or("");

    match version {
        "" | "*" | "latest" | "x" => "latest".to_string(),
        v => v.to_string(),
    }
}
