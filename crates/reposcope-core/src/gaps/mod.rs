//! Gap analysis engine.
//!
//! Compares each category of a [`StructuredTechStack`] against a checklist
//! of expected capabilities, then synthesizes key decisions, migration notes
//! and strategic recommendations. Pure over its input.

pub mod checklists;
pub mod strategy;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::stack::StructuredTechStack;
use crate::types::{Category, Priority};

pub use checklists::{checklist, Checklist, PriorityScheme};
pub use strategy::StrategicRecommendation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapCategoryAnalysis {
    pub current_technologies: Vec<String>,
    pub identified_gaps: Vec<String>,
    pub recommendations: Vec<String>,
    pub priority: Priority,
}

/// A structured stack extended with gap analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedTechStack {
    #[serde(flatten)]
    pub stack: StructuredTechStack,
    pub gap_analysis: BTreeMap<Category, GapCategoryAnalysis>,
    pub key_decisions: Vec<String>,
    pub migration_notes: Vec<String>,
    pub strategic_recommendations: Vec<StrategicRecommendation>,
}

impl EnhancedTechStack {
    pub fn category(&self, category: Category) -> Option<&GapCategoryAnalysis> {
        self.gap_analysis.get(&category)
    }

    /// Categories with at least one gap.
    pub fn gap_category_count(&self) -> usize {
        self.gap_analysis
            .values()
            .filter(|a| !a.identified_gaps.is_empty())
            .count()
    }
}

/// Gap analysis for one category.
pub fn analyze_category(category: Category, technologies: &[String]) -> GapCategoryAnalysis {
    let list = checklist(category);
    let identified_gaps = list.gaps(technologies);
    let recommendations = list.recommendations_for(&identified_gaps);
    let priority = list.priority.classify(identified_gaps.len());

    debug!(
        category = %category,
        gaps = identified_gaps.len(),
        priority = %priority,
        "Category analyzed"
    );

    GapCategoryAnalysis {
        current_technologies: technologies.to_vec(),
        identified_gaps,
        recommendations,
        priority,
    }
}

/// Run the gap engine over a structured stack.
pub fn analyze(stack: StructuredTechStack) -> EnhancedTechStack {
    let gap_analysis: BTreeMap<Category, GapCategoryAnalysis> = Category::ALL
        .iter()
        .map(|c| (*c, analyze_category(*c, stack.technologies.get(*c))))
        .collect();

    let key_decisions = strategy::key_decisions(&stack);
    let migration_notes = strategy::migration_notes(&stack);
    let strategic_recommendations = strategy::strategic_recommendations(&gap_analysis);

    info!(
        repository = %stack.repository.full_name,
        high_priority = strategic_recommendations
            .iter()
            .filter(|r| r.priority == Priority::High)
            .count(),
        "Gap analysis complete"
    );

    EnhancedTechStack {
        stack,
        gap_analysis,
        key_decisions,
        migration_notes,
        strategic_recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{
        AiIntegration, DatabaseAnalysis, InfrastructureAnalysis, StackMetadata,
    };
    use crate::types::{RepositoryInfo, TechnologyCategoryMap};

    fn stack_with(entries: &[(Category, &str)], frameworks: &[&str]) -> StructuredTechStack {
        let mut technologies = TechnologyCategoryMap::default();
        for (category, tech) in entries {
            technologies.push(*category, *tech);
        }
        StructuredTechStack {
            repository: RepositoryInfo {
                name: "app".to_string(),
                full_name: "acme/app".to_string(),
                description: None,
                language: None,
                size_kb: 1,
                updated_at: None,
                default_branch: "main".to_string(),
            },
            technologies,
            frameworks: frameworks.iter().map(|f| f.to_string()).collect(),
            languages: vec![],
            package_managers: vec![],
            dev_tools: vec![],
            dependencies: Default::default(),
            configurations: Default::default(),
            infrastructure: InfrastructureAnalysis::default(),
            database: DatabaseAnalysis::default(),
            ai_integration: AiIntegration::default(),
            metadata: StackMetadata {
                files_analyzed: 0,
                total_files_scanned: 0,
                dependency_count: 0,
                analyzed_at: "2024-05-01T12:00:00Z".parse().unwrap(),
                method: "test".to_string(),
            },
        }
    }

    #[test]
    fn test_empty_stack_covers_all_categories() {
        let enhanced = analyze(stack_with(&[], &[]));

        assert_eq!(enhanced.gap_analysis.len(), 8);
        let database = enhanced.category(Category::Database).unwrap();
        assert!(database
            .identified_gaps
            .contains(&"No database detected".to_string()));
        assert_eq!(database.priority, Priority::High);
        assert!(database.current_technologies.is_empty());

        // two-tier categories never reach high
        assert_eq!(enhanced.category(Category::Ai).unwrap().priority, Priority::Medium);
        assert_eq!(
            enhanced.category(Category::Integrations).unwrap().priority,
            Priority::Medium
        );
        assert_eq!(enhanced.gap_category_count(), 8);
    }

    #[test]
    fn test_supabase_has_database_but_no_cache() {
        let enhanced = analyze(stack_with(
            &[
                (Category::Database, "PostgreSQL"),
                (Category::Database, "Supabase"),
                (Category::Frontend, "Tailwind-CSS-3.3.0"),
                (Category::Frontend, "Tailwind CSS"),
            ],
            &["Tailwind CSS"],
        ));

        let database = enhanced.category(Category::Database).unwrap();
        assert!(!database
            .identified_gaps
            .iter()
            .any(|g| g == "No database detected"));
        assert!(database
            .identified_gaps
            .contains(&"No caching layer detected".to_string()));
        assert!(database
            .identified_gaps
            .contains(&"No backup strategy documented".to_string()));
        assert_eq!(
            database.current_technologies,
            vec!["PostgreSQL".to_string(), "Supabase".to_string()]
        );
    }

    #[test]
    fn test_recommendations_follow_gap_order() {
        let analysis = analyze_category(Category::Frontend, &["React-18.3.1".to_string()]);
        assert_eq!(analysis.identified_gaps.len(), 3);
        assert_eq!(analysis.recommendations.len(), 3);
        assert!(analysis.recommendations[0].contains("TypeScript"));
        assert_eq!(analysis.priority, Priority::High);
    }

    #[test]
    fn test_decisions_and_notes_never_empty() {
        let enhanced = analyze(stack_with(&[], &[]));
        assert_eq!(enhanced.key_decisions.len(), 1);
        assert_eq!(enhanced.migration_notes.len(), 2);
        // frontend, backend, database, infrastructure and development are high
        assert_eq!(enhanced.strategic_recommendations.len(), 5 + 3);
    }

    #[test]
    fn test_decisions_and_migration_notes_from_stack() {
        let enhanced = analyze(stack_with(
            &[
                (Category::Frontend, "Next.js-13.5.0"),
                (Category::Frontend, "React-17.0.2"),
                (Category::Frontend, "TypeScript-5.4.0"),
                (Category::Backend, "Supabase-2.39.0"),
            ],
            &["Next.js", "React"],
        ));

        assert!(enhanced
            .key_decisions
            .iter()
            .any(|d| d.starts_with("Next.js chosen")));
        assert!(enhanced
            .key_decisions
            .iter()
            .any(|d| d.starts_with("Supabase adopted")));
        assert!(enhanced
            .key_decisions
            .contains(&"Primary frameworks: Next.js, React".to_string()));

        assert!(enhanced.migration_notes[0].starts_with("React 17 detected"));
        assert!(enhanced.migration_notes[1].starts_with("Next.js 13 detected"));
        assert_eq!(enhanced.migration_notes.len(), 4);
    }

    #[test]
    fn test_enhanced_stack_serializes_flat() {
        let enhanced = analyze(stack_with(&[], &[]));
        let json = serde_json::to_value(&enhanced).unwrap();
        assert!(json.get("technologies").is_some());
        assert!(json["gap_analysis"].get("database").is_some());
    }
}
