//! Request and report types for the public analysis operations.
//!
//! An [`AnalysisReport`] is the terminal artifact of one comprehensive run:
//! request metadata, a summary per stage, a denormalized view of every
//! category next to its gaps, and summary counters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::REPORT_STAGES;
use crate::gaps::{EnhancedTechStack, GapCategoryAnalysis, StrategicRecommendation};
use crate::stack::{AiIntegration, DatabaseAnalysis, InfrastructureAnalysis, StructuredTechStack};
use crate::types::{
    AnalysisDepth, Category, ExplorationResult, Priority, RepositoryInfo, TechnologyCategoryMap,
};

/// Prefix of every entry in a `<category>_gaps` list. Those lists carry the
/// category's identified gaps; recommendations are only reported unprefixed,
/// under `stage_results.gap_analysis`.
pub const GAP_PREFIX: &str = "GAP: ";

// ============================================================================
// Request
// ============================================================================

/// Input of both analysis operations.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// `owner/repo`, `github.com/owner/repo` or a full GitHub URL.
    pub repository_url: String,
    /// Access token; empty sends unauthenticated requests.
    #[serde(default)]
    pub github_token: String,
    #[serde(default)]
    pub analysis_depth: AnalysisDepth,
    /// Recorded in report metadata only.
    #[serde(default)]
    pub focus_areas: Vec<String>,
    /// Passed through to report metadata.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl AnalysisRequest {
    pub fn new(repository_url: impl Into<String>) -> Self {
        Self {
            repository_url: repository_url.into(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.github_token = token.into();
        self
    }

    pub fn with_depth(mut self, depth: AnalysisDepth) -> Self {
        self.analysis_depth = depth;
        self
    }
}

impl std::fmt::Debug for AnalysisRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisRequest")
            .field("repository_url", &self.repository_url)
            .field(
                "github_token",
                &if self.github_token.is_empty() { "<none>" } else { "<redacted>" },
            )
            .field("analysis_depth", &self.analysis_depth)
            .field("focus_areas", &self.focus_areas)
            .field("user_id", &self.user_id)
            .finish()
    }
}

// ============================================================================
// Report
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub analysis_id: Uuid,
    pub repository_url: String,
    pub user_id: Option<String>,
    pub analysis_depth: AnalysisDepth,
    pub focus_areas: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
    /// Stage names in execution order.
    pub stages: Vec<String>,
}

/// Stage 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationSummary {
    pub repository: RepositoryInfo,
    pub files_fetched: usize,
    pub total_files_scanned: usize,
    pub tree_truncated: bool,
    pub directories: Vec<String>,
}

/// Stage 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizationSummary {
    pub technologies: TechnologyCategoryMap,
    pub frameworks: Vec<String>,
    pub languages: Vec<String>,
    pub package_managers: Vec<String>,
    pub dev_tools: Vec<String>,
    pub infrastructure: InfrastructureAnalysis,
    pub database: DatabaseAnalysis,
    pub ai_integration: AiIntegration,
    pub dependency_count: usize,
}

/// Stage 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapAnalysisSummary {
    pub gap_analysis: BTreeMap<Category, GapCategoryAnalysis>,
    pub strategic_recommendations: Vec<StrategicRecommendation>,
    pub key_decisions: Vec<String>,
    pub migration_notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResults {
    pub exploration: ExplorationSummary,
    pub categorization: CategorizationSummary,
    pub gap_analysis: GapAnalysisSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_technologies_detected: usize,
    /// Categories with at least one gap.
    pub total_gap_categories: usize,
    pub high_priority_recommendations: usize,
    pub success: bool,
}

/// Composite output of a comprehensive analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub stage_results: StageResults,
    /// `<category>` and `<category>_gaps` for every category.
    pub enhanced_tech_stack: BTreeMap<String, Vec<String>>,
    pub summary: ReportSummary,
}

impl AnalysisReport {
    /// Assemble the report from a finished run.
    pub fn assemble(
        request: &AnalysisRequest,
        exploration: &ExplorationResult,
        enhanced: EnhancedTechStack,
    ) -> Self {
        let metadata = ReportMetadata {
            analysis_id: Uuid::new_v4(),
            repository_url: request.repository_url.clone(),
            user_id: request.user_id.clone(),
            analysis_depth: request.analysis_depth,
            focus_areas: request.focus_areas.clone(),
            analyzed_at: Utc::now(),
            stages: REPORT_STAGES.iter().map(|s| s.to_string()).collect(),
        };

        let summary = ReportSummary {
            total_technologies_detected: enhanced.stack.technologies.total(),
            total_gap_categories: enhanced.gap_category_count(),
            high_priority_recommendations: enhanced
                .strategic_recommendations
                .iter()
                .filter(|r| r.priority == Priority::High)
                .count(),
            success: true,
        };

        let enhanced_tech_stack = denormalize(&enhanced);

        let EnhancedTechStack {
            stack,
            gap_analysis,
            key_decisions,
            migration_notes,
            strategic_recommendations,
        } = enhanced;

        let stage_results = StageResults {
            exploration: ExplorationSummary {
                repository: stack.repository,
                files_fetched: exploration.files.len(),
                total_files_scanned: exploration.total_files_scanned,
                tree_truncated: exploration.tree_truncated,
                directories: exploration.directories.clone(),
            },
            categorization: CategorizationSummary {
                technologies: stack.technologies,
                frameworks: stack.frameworks,
                languages: stack.languages,
                package_managers: stack.package_managers,
                dev_tools: stack.dev_tools,
                infrastructure: stack.infrastructure,
                database: stack.database,
                ai_integration: stack.ai_integration,
                dependency_count: stack.metadata.dependency_count,
            },
            gap_analysis: GapAnalysisSummary {
                gap_analysis,
                strategic_recommendations,
                key_decisions,
                migration_notes,
            },
        };

        Self {
            metadata,
            stage_results,
            enhanced_tech_stack,
            summary,
        }
    }
}

/// Every category's technologies next to its prefixed gaps.
fn denormalize(enhanced: &EnhancedTechStack) -> BTreeMap<String, Vec<String>> {
    let mut view = BTreeMap::new();
    for category in Category::ALL {
        view.insert(
            category.as_str().to_string(),
            enhanced.stack.technologies.get(category).to_vec(),
        );
        let gaps = enhanced
            .category(category)
            .map(|a| {
                a.identified_gaps
                    .iter()
                    .map(|g| format!("{}{}", GAP_PREFIX, g))
                    .collect()
            })
            .unwrap_or_default();
        view.insert(format!("{}_gaps", category.as_str()), gaps);
    }
    view
}

// ============================================================================
// Simple Summary
// ============================================================================

/// Output of the one-shot analysis (exploration and categorization only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSummary {
    pub repository_url: String,
    pub repository: RepositoryInfo,
    pub technologies: TechnologyCategoryMap,
    pub frameworks: Vec<String>,
    pub languages: Vec<String>,
    pub package_managers: Vec<String>,
    pub dev_tools: Vec<String>,
    pub dependency_count: usize,
    pub files_analyzed: usize,
    pub analyzed_at: DateTime<Utc>,
}

impl StackSummary {
    pub fn from_stack(repository_url: impl Into<String>, stack: StructuredTechStack) -> Self {
        Self {
            repository_url: repository_url.into(),
            repository: stack.repository,
            technologies: stack.technologies,
            frameworks: stack.frameworks,
            languages: stack.languages,
            package_managers: stack.package_managers,
            dev_tools: stack.dev_tools,
            dependency_count: stack.metadata.dependency_count,
            files_analyzed: stack.metadata.files_analyzed,
            analyzed_at: stack.metadata.analyzed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_from_json() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"repository_url": "acme/app"}"#).unwrap();
        assert_eq!(request.repository_url, "acme/app");
        assert_eq!(request.analysis_depth, AnalysisDepth::Comprehensive);
        assert!(request.github_token.is_empty());
        assert!(request.focus_areas.is_empty());
        assert_eq!(request.user_id, None);
    }

    #[test]
    fn test_request_full_json() {
        let request: AnalysisRequest = serde_json::from_str(
            r#"{
                "repository_url": "https://github.com/acme/app",
                "github_token": "ghp_secret",
                "analysis_depth": "basic",
                "focus_areas": ["security"],
                "user_id": "u-1"
            }"#,
        )
        .unwrap();
        assert_eq!(request.analysis_depth, AnalysisDepth::Basic);
        assert_eq!(request.focus_areas, vec!["security"]);
        assert_eq!(request.user_id.as_deref(), Some("u-1"));
    }

    #[test]
    fn test_request_debug_redacts_token() {
        let request = AnalysisRequest::new("acme/app").with_token("ghp_secret");
        let debug = format!("{:?}", request);
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
