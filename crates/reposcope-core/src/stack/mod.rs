//! Technology analyzer.
//!
//! Turns an [`ExplorationResult`] into a [`StructuredTechStack`]: a merged
//! dependency map, the configuration presence map, frameworks, the eight
//! technology categories, languages, package managers, developer tools and
//! the infrastructure, database and AI sub-analyses.
//!
//! Analysis is pure: the timestamp comes from the exploration, so analyzing
//! the same exploration twice yields identical output.

mod detect;
pub mod manifests;
pub mod rules;
pub mod tables;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{ANALYSIS_METHOD, CONFIG_FILES, CONFIG_PREVIEW_CHARS};
use crate::types::{ExplorationResult, FetchedFile, RepositoryInfo, TechnologyCategoryMap};

pub use detect::{detect_dev_tools, detect_languages, detect_package_managers};
pub use manifests::extract_dependencies;
use rules::Evidence;
use tables::*;

// ============================================================================
// Types
// ============================================================================

/// Dependency name to declared version, exactly as written in the manifest.
pub type DependencyMap = BTreeMap<String, String>;

/// Presence of one allow-listed configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPresence {
    pub exists: bool,
    /// Size in bytes (0 when absent).
    pub size: u64,
    /// First characters of the file.
    pub preview: String,
}

impl ConfigPresence {
    pub fn absent() -> Self {
        Self {
            exists: false,
            size: 0,
            preview: String::new(),
        }
    }
}

/// Every allow-listed configuration file, present or not.
pub type ConfigurationPresenceMap = BTreeMap<String, ConfigPresence>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfrastructureAnalysis {
    pub containerization: Vec<String>,
    pub ci_cd: Vec<String>,
    pub hosting: Vec<String>,
    pub monitoring: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseAnalysis {
    pub databases: Vec<String>,
    pub orms: Vec<String>,
    pub caching: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiIntegration {
    pub providers: Vec<String>,
    pub frameworks: Vec<String>,
    pub vector_stores: Vec<String>,
    pub has_ai: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackMetadata {
    /// Number of fetched files.
    pub files_analyzed: usize,
    pub total_files_scanned: usize,
    pub dependency_count: usize,
    pub analyzed_at: DateTime<Utc>,
    pub method: String,
}

/// Output of the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredTechStack {
    pub repository: RepositoryInfo,
    pub technologies: TechnologyCategoryMap,
    pub frameworks: Vec<String>,
    pub languages: Vec<String>,
    pub package_managers: Vec<String>,
    pub dev_tools: Vec<String>,
    pub dependencies: DependencyMap,
    pub configurations: ConfigurationPresenceMap,
    pub infrastructure: InfrastructureAnalysis,
    pub database: DatabaseAnalysis,
    pub ai_integration: AiIntegration,
    pub metadata: StackMetadata,
}

// ============================================================================
// Analysis
// ============================================================================

/// Analyze one exploration.
///
/// Never fails: malformed manifests are logged and skipped, and anything
/// undetected simply leaves its list empty.
pub fn analyze(exploration: &ExplorationResult) -> StructuredTechStack {
    let dependencies = extract_dependencies(&exploration.files);
    let configurations = detect_configurations(&exploration.files);

    let evidence = Evidence::new(
        &dependencies,
        &configurations,
        &exploration.directories,
        &exploration.scanned_paths,
    );

    let frameworks = evidence.collect(FRAMEWORK_RULES);

    let mut technologies = TechnologyCategoryMap::default();
    for (category, rules) in CATEGORY_RULES {
        for technology in evidence.collect(rules) {
            technologies.push(*category, technology);
        }
    }

    let infrastructure = InfrastructureAnalysis {
        containerization: evidence.collect(CONTAINERIZATION_RULES),
        ci_cd: evidence.collect(CI_CD_RULES),
        hosting: evidence.collect(HOSTING_RULES),
        monitoring: evidence.collect(MONITORING_RULES),
    };

    let database = DatabaseAnalysis {
        databases: evidence.collect(DATABASE_ENGINE_RULES),
        orms: evidence.collect(ORM_RULES),
        caching: evidence.collect(CACHING_RULES),
    };

    let providers = evidence.collect(AI_PROVIDER_RULES);
    let ai_frameworks = evidence.collect(AI_FRAMEWORK_RULES);
    let vector_stores = evidence.collect(VECTOR_STORE_RULES);
    let has_ai = !(providers.is_empty() && ai_frameworks.is_empty() && vector_stores.is_empty());
    let ai_integration = AiIntegration {
        providers,
        frameworks: ai_frameworks,
        vector_stores,
        has_ai,
    };

    let languages = detect_languages(&exploration.scanned_paths);
    let package_managers = detect_package_managers(&exploration.scanned_paths);
    let dev_tools = detect_dev_tools(&dependencies);

    let metadata = StackMetadata {
        files_analyzed: exploration.files.len(),
        total_files_scanned: exploration.total_files_scanned,
        dependency_count: dependencies.len(),
        analyzed_at: exploration.explored_at,
        method: ANALYSIS_METHOD.to_string(),
    };

    debug!(
        frameworks = ?frameworks,
        languages = ?languages,
        package_managers = ?package_managers,
        "Stack details"
    );
    info!(
        repository = %exploration.repository.full_name,
        dependencies = metadata.dependency_count,
        technologies = technologies.total(),
        "Technology analysis complete"
    );

    StructuredTechStack {
        repository: exploration.repository.clone(),
        technologies,
        frameworks,
        languages,
        package_managers,
        dev_tools,
        dependencies,
        configurations,
        infrastructure,
        database,
        ai_integration,
        metadata,
    }
}

/// Presence map over every allow-listed configuration file.
///
/// Only already-fetched files count; a listed but unfetched file is absent.
pub fn detect_configurations(files: &[FetchedFile]) -> ConfigurationPresenceMap {
    CONFIG_FILES
        .iter()
        .map(|name| {
            let presence = files
                .iter()
                .find(|f| f.path == *name)
                .map(|f| ConfigPresence {
                    exists: true,
                    size: f.size,
                    preview: f.content.chars().take(CONFIG_PREVIEW_CHARS).collect(),
                })
                .unwrap_or_else(ConfigPresence::absent);
            (name.to_string(), presence)
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, RepositoryInfo};

    fn repo() -> RepositoryInfo {
        RepositoryInfo {
            name: "app".to_string(),
            full_name: "acme/app".to_string(),
            description: None,
            language: Some("TypeScript".to_string()),
            size_kb: 100,
            updated_at: None,
            default_branch: "main".to_string(),
        }
    }

    fn fetched(path: &str, content: &str) -> FetchedFile {
        FetchedFile {
            path: path.to_string(),
            content: content.to_string(),
            size: content.len() as u64,
            file_type: "text".to_string(),
        }
    }

    fn exploration(files: Vec<FetchedFile>, extra_paths: &[&str]) -> ExplorationResult {
        let mut scanned_paths: Vec<String> = files.iter().map(|f| f.path.clone()).collect();
        scanned_paths.extend(extra_paths.iter().map(|p| p.to_string()));
        let mut directories: Vec<String> = scanned_paths
            .iter()
            .flat_map(|p| {
                let parts: Vec<&str> = p.split('/').collect();
                (1..parts.len())
                    .map(|i| parts[..i].join("/"))
                    .collect::<Vec<_>>()
            })
            .collect();
        directories.sort();
        directories.dedup();

        ExplorationResult {
            repository: repo(),
            total_files_scanned: scanned_paths.len(),
            files,
            directories,
            scanned_paths,
            tree_truncated: false,
            explored_at: "2024-05-01T12:00:00Z".parse().unwrap(),
        }
    }

    const NEXT_PACKAGE_JSON: &str = r#"{
        "name": "app",
        "dependencies": { "next": "^14.2.3", "react": "18.3.1", "react-dom": "18.3.1" },
        "devDependencies": { "typescript": "^5.4.0", "eslint": "^8.57.0" }
    }"#;

    #[test]
    fn test_next_fixture() {
        let stack = analyze(&exploration(
            vec![fetched("package.json", NEXT_PACKAGE_JSON)],
            &["package-lock.json", "src/app/page.tsx"],
        ));

        assert_eq!(stack.dependencies.get("next").map(String::as_str), Some("^14.2.3"));
        assert_eq!(stack.dependencies.len(), 5);
        assert_eq!(stack.frameworks, vec!["Next.js", "React"]);

        let frontend = stack.technologies.get(Category::Frontend);
        assert_eq!(frontend[0], "Next.js-14.2.3");
        assert!(frontend.contains(&"React-18.3.1".to_string()));
        assert!(frontend.contains(&"TypeScript-5.4.0".to_string()));
        assert!(stack
            .technologies
            .get(Category::Backend)
            .contains(&"Next.js-API-Routes-14.2.3".to_string()));

        assert_eq!(stack.languages, vec!["TypeScript"]);
        assert_eq!(stack.package_managers, vec!["npm"]);
        assert_eq!(stack.dev_tools, vec!["TypeScript", "ESLint"]);
        assert_eq!(stack.metadata.files_analyzed, 1);
        assert_eq!(stack.metadata.dependency_count, 5);
        assert_eq!(stack.metadata.method, ANALYSIS_METHOD);
    }

    #[test]
    fn test_no_manifests() {
        let stack = analyze(&exploration(vec![fetched("README.md", "# hello")], &[]));

        assert!(stack.dependencies.is_empty());
        assert!(stack.frameworks.is_empty());
        assert_eq!(stack.technologies.total(), 0);
        assert!(stack.package_managers.is_empty());
        assert!(!stack.ai_integration.has_ai);
        assert_eq!(stack.configurations.len(), CONFIG_FILES.len());
        assert!(stack.configurations.values().all(|c| !c.exists));
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let input = exploration(
            vec![
                fetched("package.json", NEXT_PACKAGE_JSON),
                fetched("Dockerfile", "FROM node:20-alpine"),
            ],
            &["src/index.ts"],
        );
        assert_eq!(analyze(&input), analyze(&input));
    }

    #[test]
    fn test_supabase_tailwind_scenario() {
        let package_json = r#"{
            "dependencies": {
                "@supabase/supabase-js": "^2.39.0",
                "tailwindcss": "^3.3.0"
            }
        }"#;
        let stack = analyze(&exploration(
            vec![
                fetched("package.json", package_json),
                fetched("tailwind.config.js", "module.exports = { content: [] }"),
            ],
            &[],
        ));

        let frontend = stack.technologies.get(Category::Frontend);
        assert!(frontend.contains(&"Tailwind-CSS-3.3.0".to_string()));
        assert!(frontend.contains(&"Tailwind CSS".to_string()));

        let database = stack.technologies.get(Category::Database);
        assert!(database.contains(&"PostgreSQL".to_string()));
        assert!(database.contains(&"Supabase".to_string()));

        assert!(stack
            .technologies
            .get(Category::Backend)
            .contains(&"Supabase-2.39.0".to_string()));
        assert!(stack
            .technologies
            .get(Category::Platforms)
            .contains(&"Supabase-2.39.0".to_string()));

        assert_eq!(stack.frameworks, vec!["Tailwind CSS"]);
        assert_eq!(stack.database.databases, vec!["PostgreSQL"]);
        assert!(stack.database.caching.is_empty());
    }

    #[test]
    fn test_config_presence_preview() {
        let long = "x".repeat(500);
        let configs = detect_configurations(&[fetched("Dockerfile", &long)]);

        let docker = &configs["Dockerfile"];
        assert!(docker.exists);
        assert_eq!(docker.size, 500);
        assert_eq!(docker.preview.chars().count(), CONFIG_PREVIEW_CHARS);
        assert_eq!(configs["vercel.json"], ConfigPresence::absent());
    }

    #[test]
    fn test_nested_config_is_not_reported() {
        let configs = detect_configurations(&[fetched("apps/web/tailwind.config.js", "{}")]);
        assert!(!configs["tailwind.config.js"].exists);
    }

    #[test]
    fn test_infrastructure_and_ai_subanalyses() {
        let package_json = r#"{
            "dependencies": {
                "openai": "^4.20.0",
                "langchain": "^0.1.0",
                "@pinecone-database/pinecone": "^2.0.0",
                "@sentry/nextjs": "^7.0.0"
            }
        }"#;
        let stack = analyze(&exploration(
            vec![
                fetched("package.json", package_json),
                fetched("Dockerfile", "FROM node:20"),
                fetched("vercel.json", "{}"),
            ],
            &[".github/workflows/deploy.yml", "infra/main.tf"],
        ));

        assert_eq!(stack.infrastructure.containerization, vec!["Docker"]);
        assert_eq!(stack.infrastructure.ci_cd, vec!["GitHub Actions"]);
        assert_eq!(stack.infrastructure.hosting, vec!["Vercel", "Terraform"]);
        assert_eq!(stack.infrastructure.monitoring, vec!["Sentry"]);

        assert!(stack.ai_integration.has_ai);
        assert_eq!(stack.ai_integration.providers, vec!["OpenAI"]);
        assert_eq!(stack.ai_integration.frameworks, vec!["LangChain"]);
        assert_eq!(stack.ai_integration.vector_stores, vec!["Pinecone"]);

        let ai = stack.technologies.get(Category::Ai);
        assert_eq!(ai[0], "OpenAI-4.20.0");
    }
}
