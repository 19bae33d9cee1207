//! Cross-category synthesis: key decisions, migration notes and strategic
//! recommendations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::checklists::normalize;
use super::GapCategoryAnalysis;
use crate::stack::StructuredTechStack;
use crate::types::{Category, Priority};

// ============================================================================
// Key Decisions
// ============================================================================

/// Marker set over every detected technology and framework, and the
/// decision it evidences.
const DECISION_RULES: &[(&[&str], &str)] = &[
    (
        &["next.js"],
        "Next.js chosen for full-stack React with server-side rendering",
    ),
    (
        &["supabase"],
        "Supabase adopted as backend-as-a-service (PostgreSQL, auth, storage)",
    ),
    (&["firebase"], "Firebase adopted as backend-as-a-service"),
    (&["typescript"], "TypeScript adopted for static typing across the codebase"),
    (&["tailwind"], "Tailwind CSS chosen for utility-first styling"),
    (&["prisma"], "Prisma chosen as the data access layer"),
    (&["docker"], "Containerized deployment with Docker"),
    (
        &["openai", "anthropic", "langchain"],
        "AI features built on hosted model providers",
    ),
];

const EVERGREEN_DECISION: &str =
    "Record architectural decisions (ADRs) alongside the code as the stack evolves";

/// Decisions evidenced by the stack, always ending with an evergreen note.
pub fn key_decisions(stack: &StructuredTechStack) -> Vec<String> {
    let haystack: Vec<String> = stack
        .technologies
        .iter()
        .flat_map(|(_, techs)| techs.iter())
        .chain(stack.frameworks.iter())
        .map(|t| normalize(t))
        .collect();

    let mut decisions: Vec<String> = DECISION_RULES
        .iter()
        .filter(|(markers, _)| {
            markers
                .iter()
                .any(|m| haystack.iter().any(|t| t.contains(*m)))
        })
        .map(|(_, decision)| decision.to_string())
        .collect();

    if !stack.frameworks.is_empty() {
        decisions.push(format!("Primary frameworks: {}", stack.frameworks.join(", ")));
    }
    decisions.push(EVERGREEN_DECISION.to_string());
    decisions
}

// ============================================================================
// Migration Notes
// ============================================================================

/// `(technology name, oldest current major, note)`.
const UPGRADE_RULES: &[(&str, u64, &str)] = &[
    (
        "React",
        18,
        "React {major} detected: upgrade to React 18+ for concurrent rendering",
    ),
    (
        "Next.js",
        14,
        "Next.js {major} detected: consider upgrading to 14+ and the App Router",
    ),
    ("Vue", 3, "Vue {major} detected: Vue 2 reached end of life, migrate to Vue 3"),
    (
        "Tailwind-CSS",
        3,
        "Tailwind CSS {major} detected: upgrade to v3 for the JIT engine",
    ),
    (
        "Express",
        5,
        "Express {major} detected: review the Express 5 migration guide",
    ),
    (
        "Webpack",
        5,
        "Webpack {major} detected: upgrade to Webpack 5 or move to Vite",
    ),
];

const EVERGREEN_NOTES: &[&str] = &[
    "Schedule regular dependency updates and review changelogs for breaking changes",
    "Pin runtime versions (Node, Python) in CI to keep builds reproducible",
];

/// Major version of a `Name-Version` identifier belonging to `name`.
fn major_version(technology: &str, name: &str) -> Option<u64> {
    let (tech_name, version) = technology.rsplit_once('-')?;
    if tech_name != name {
        return None;
    }
    version.split('.').next()?.parse().ok()
}

/// Upgrade notes for outdated majors, always ending with evergreen notes.
pub fn migration_notes(stack: &StructuredTechStack) -> Vec<String> {
    let mut notes: Vec<String> = Vec::new();
    for (name, current, template) in UPGRADE_RULES {
        let outdated = stack
            .technologies
            .iter()
            .flat_map(|(_, techs)| techs.iter())
            .filter_map(|t| major_version(t, name))
            .find(|major| major < current);
        if let Some(major) = outdated {
            let note = template.replace("{major}", &major.to_string());
            if !notes.contains(&note) {
                notes.push(note);
            }
        }
    }
    notes.extend(EVERGREEN_NOTES.iter().map(|n| n.to_string()));
    notes
}

// ============================================================================
// Strategic Recommendations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategicRecommendation {
    /// Category key, or `architecture` / `security` / `observability` for
    /// the generic entries.
    pub category: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub timeline: String,
    pub impact: String,
}

/// `(category, title, description, priority, timeline, impact)`.
const GENERIC_RECOMMENDATIONS: &[(&str, &str, &str, Priority, &str, &str)] = &[
    (
        "architecture",
        "Evaluate microservices architecture",
        "Assess whether independently deployable services would help as the team and traffic grow",
        Priority::Low,
        "6-12 months",
        "medium",
    ),
    (
        "security",
        "Establish automated security scanning",
        "Add dependency and static security scanning to CI to catch vulnerabilities early",
        Priority::Medium,
        "1-2 months",
        "high",
    ),
    (
        "observability",
        "Implement comprehensive observability",
        "Combine structured logging, metrics and tracing to shorten incident response",
        Priority::Medium,
        "2-4 months",
        "high",
    ),
];

/// One recommendation per high-priority category, then the generic set.
pub fn strategic_recommendations(
    gap_analysis: &BTreeMap<Category, GapCategoryAnalysis>,
) -> Vec<StrategicRecommendation> {
    let mut recommendations: Vec<StrategicRecommendation> = gap_analysis
        .iter()
        .filter(|(_, analysis)| analysis.priority == Priority::High)
        .map(|(category, analysis)| StrategicRecommendation {
            category: category.as_str().to_string(),
            title: format!("Close {} capability gaps", category.label()),
            description: format!(
                "{} gaps identified: {}",
                analysis.identified_gaps.len(),
                analysis.identified_gaps.join("; ")
            ),
            priority: Priority::High,
            timeline: "1-3 months".to_string(),
            impact: "high".to_string(),
        })
        .collect();

    recommendations.extend(GENERIC_RECOMMENDATIONS.iter().map(
        |(category, title, description, priority, timeline, impact)| StrategicRecommendation {
            category: category.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            priority: *priority,
            timeline: timeline.to_string(),
            impact: impact.to_string(),
        },
    ));
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_version() {
        assert_eq!(major_version("React-17.0.2", "React"), Some(17));
        assert_eq!(major_version("Tailwind-CSS-2.2.19", "Tailwind-CSS"), Some(2));
        assert_eq!(major_version("Next.js-API-Routes-13.0.0", "Next.js"), None);
        assert_eq!(major_version("React-latest", "React"), None);
        assert_eq!(major_version("Docker", "React"), None);
    }

    #[test]
    fn test_generic_recommendations_always_present() {
        let recs = strategic_recommendations(&BTreeMap::new());
        assert_eq!(recs.len(), GENERIC_RECOMMENDATIONS.len());
        assert_eq!(recs[0].title, "Evaluate microservices architecture");
    }

    #[test]
    fn test_high_category_yields_recommendation() {
        let mut gaps = BTreeMap::new();
        gaps.insert(
            Category::Database,
            GapCategoryAnalysis {
                current_technologies: vec![],
                identified_gaps: vec!["No database detected".to_string(); 3],
                recommendations: vec![],
                priority: Priority::High,
            },
        );
        gaps.insert(
            Category::Frontend,
            GapCategoryAnalysis {
                current_technologies: vec![],
                identified_gaps: vec!["No type system detected".to_string()],
                recommendations: vec![],
                priority: Priority::Medium,
            },
        );

        let recs = strategic_recommendations(&gaps);
        assert_eq!(recs.len(), 1 + GENERIC_RECOMMENDATIONS.len());
        assert_eq!(recs[0].category, "database");
        assert_eq!(recs[0].title, "Close Database capability gaps");
        assert_eq!(recs[0].priority, Priority::High);
    }
}
