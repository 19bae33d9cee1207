//! Repository identifier parsing.
//!
//! Accepts `owner/repo`, `github.com/owner/repo`, full `http(s)://` URLs with
//! an optional `.git` suffix or extra path segments (`/tree/main/src`), and
//! SSH remotes (`git@github.com:owner/repo.git`). All forms resolve to the
//! same [`RepositoryRef`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::RepoScopeError;

/// An `owner/repo` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Parse a repository identifier into `owner/repo`.
///
/// # Errors
///
/// Returns [`RepoScopeError::InvalidRepositoryUrl`] when no owner/repo pair
/// can be extracted or either part contains characters GitHub does not allow.
pub fn parse_repository_url(input: &str) -> Result<RepositoryRef, RepoScopeError> {
    let invalid = |reason: &str| RepoScopeError::InvalidRepositoryUrl {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("repository identifier is empty"));
    }

    // Drop scheme, or turn `git@host:owner/repo` into `host/owner/repo`.
    let without_scheme = match trimmed.split_once("://") {
        Some((_, rest)) => rest.to_string(),
        None => match trimmed.strip_prefix("git@") {
            Some(rest) => rest.replacen(':', "/", 1),
            None => trimmed.to_string(),
        },
    };

    let without_suffix = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let mut segments: Vec<&str> = without_suffix.split('/').filter(|s| !s.is_empty()).collect();

    // Owners never contain dots, so a dotted first segment is a host.
    if segments.first().is_some_and(|s| s.contains('.') || s.contains(':')) {
        segments.remove(0);
    }

    let (owner, repo) = match segments.as_slice() {
        [owner, repo, ..] => (*owner, *repo),
        _ => return Err(invalid("missing owner or repository name")),
    };

    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    if !is_valid_owner(owner) {
        return Err(invalid("owner may only contain letters, digits and hyphens"));
    }
    if !is_valid_repo(repo) {
        return Err(invalid(
            "repository name may only contain letters, digits, `.`, `-` and `_`",
        ));
    }

    Ok(RepositoryRef::new(owner, repo))
}

fn is_valid_owner(owner: &str) -> bool {
    !owner.is_empty()
        && owner.len() <= 39
        && owner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_valid_repo(repo: &str) -> bool {
    !repo.is_empty()
        && repo != "."
        && repo != ".."
        && repo
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalent_forms() {
        let expected = RepositoryRef::new("vercel", "next.js");
        for input in [
            "vercel/next.js",
            "github.com/vercel/next.js",
            "https://github.com/vercel/next.js",
            "http://github.com/vercel/next.js",
            "https://github.com/vercel/next.js.git",
            "https://github.com/vercel/next.js/",
            "https://github.com/vercel/next.js/tree/canary/packages",
            "https://www.github.com/vercel/next.js?tab=readme",
            "git@github.com:vercel/next.js.git",
            "  vercel/next.js  ",
        ] {
            assert_eq!(parse_repository_url(input).unwrap(), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        for input in [
            "",
            "   ",
            "justone",
            "https://github.com/",
            "https://github.com/owner",
            "own er/repo",
            "owner/re po",
            "owner/..",
        ] {
            let err = parse_repository_url(input).unwrap_err();
            assert!(
                matches!(err, RepoScopeError::InvalidRepositoryUrl { .. }),
                "input: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_display_and_full_name() {
        let reference = parse_repository_url("rust-lang/rust").unwrap();
        assert_eq!(reference.to_string(), "rust-lang/rust");
        assert_eq!(reference.full_name(), "rust-lang/rust");
    }
}
