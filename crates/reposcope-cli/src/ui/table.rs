//! Table rendering for CLI output using comfy-table.
//!
//! | Command | Table Function |
//! |---------|----------------|
//! | `reposcope analyze` / `scan` | `render_technologies_table()` |
//! | `reposcope analyze` | `render_gaps_table()`, `render_recommendations_table()` |
//! | `reposcope analyze` / `scan` | `render_metrics_table()` |

use std::collections::BTreeMap;

use comfy_table::presets::NOTHING;
use comfy_table::{Cell, CellAlignment, ColumnConstraint, Table, Width};

use reposcope_core::{Category, GapCategoryAnalysis, StrategicRecommendation, TechnologyCategoryMap};

use super::format::{join_limited, truncate_str};

/// Technologies listed per cell before summarizing the rest.
const MAX_LISTED: usize = 6;

/// Render detected technologies, one row per category.
///
/// # Example Output
///
/// ```text
/// CATEGORY         COUNT   TECHNOLOGIES
/// Frontend             3   Next.js-14.2.3, React-18.3.1, TypeScript-5.4.5
/// Database             2   PostgreSQL, Supabase
/// ```
pub fn render_technologies_table(technologies: &TechnologyCategoryMap) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);

    table.set_header(vec![
        Cell::new("CATEGORY"),
        Cell::new("COUNT").set_alignment(CellAlignment::Right),
        Cell::new("TECHNOLOGIES"),
    ]);

    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(14)), // CATEGORY
        ColumnConstraint::LowerBoundary(Width::Fixed(5)),  // COUNT
        ColumnConstraint::LowerBoundary(Width::Fixed(30)), // TECHNOLOGIES
    ]);

    for category in Category::ALL {
        let techs = technologies.get(category);
        table.add_row(vec![
            Cell::new(category.label()),
            Cell::new(techs.len()).set_alignment(CellAlignment::Right),
            Cell::new(join_limited(techs, MAX_LISTED)),
        ]);
    }

    table.trim_fmt().to_string()
}

/// Render gap counts and priority per category.
///
/// # Example Output
///
/// ```text
/// CATEGORY         PRIORITY   GAPS   FIRST GAP
/// Frontend         high          3   No TypeScript usage detected
/// AI               medium        1   No AI integration detected
/// ```
pub fn render_gaps_table(analyses: &BTreeMap<Category, GapCategoryAnalysis>) -> String {
    if analyses.is_empty() {
        return String::new();
    }

    let mut table = Table::new();
    table.load_preset(NOTHING);

    table.set_header(vec![
        Cell::new("CATEGORY"),
        Cell::new("PRIORITY"),
        Cell::new("GAPS").set_alignment(CellAlignment::Right),
        Cell::new("FIRST GAP"),
    ]);

    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(14)), // CATEGORY
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),  // PRIORITY
        ColumnConstraint::LowerBoundary(Width::Fixed(4)),  // GAPS
        ColumnConstraint::LowerBoundary(Width::Fixed(30)), // FIRST GAP
    ]);

    for (category, analysis) in analyses {
        let first = analysis
            .identified_gaps
            .first()
            .map(|g| truncate_str(g, 50))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(category.label()),
            Cell::new(analysis.priority.as_str()),
            Cell::new(analysis.identified_gaps.len()).set_alignment(CellAlignment::Right),
            Cell::new(first),
        ]);
    }

    table.trim_fmt().to_string()
}

/// Render strategic recommendations.
///
/// # Example Output
///
/// ```text
/// PRIORITY   TIMELINE     AREA            TITLE
/// high       1-3 months   frontend        Close Frontend capability gaps
/// medium     1-2 months   security        Automate security scanning
/// ```
pub fn render_recommendations_table(recommendations: &[StrategicRecommendation]) -> String {
    if recommendations.is_empty() {
        return String::new();
    }

    let mut table = Table::new();
    table.load_preset(NOTHING);

    table.set_header(vec![
        Cell::new("PRIORITY"),
        Cell::new("TIMELINE"),
        Cell::new("AREA"),
        Cell::new("TITLE"),
    ]);

    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),  // PRIORITY
        ColumnConstraint::LowerBoundary(Width::Fixed(10)), // TIMELINE
        ColumnConstraint::LowerBoundary(Width::Fixed(12)), // AREA
        ColumnConstraint::LowerBoundary(Width::Fixed(30)), // TITLE
    ]);

    for rec in recommendations {
        table.add_row(vec![
            Cell::new(rec.priority.as_str()),
            Cell::new(&rec.timeline),
            Cell::new(&rec.category),
            Cell::new(truncate_str(&rec.title, 60)),
        ]);
    }

    table.trim_fmt().to_string()
}

/// Render a simple key-value metrics table.
///
/// # Example Output
///
/// ```text
/// METRIC                  VALUE
/// Files analyzed             14
/// Dependencies               38
/// ```
pub fn render_metrics_table(metrics: &[(&str, String)]) -> String {
    if metrics.is_empty() {
        return String::new();
    }

    let mut table = Table::new();
    table.load_preset(NOTHING);

    table.set_header(vec![
        Cell::new("METRIC"),
        Cell::new("VALUE").set_alignment(CellAlignment::Right),
    ]);

    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(18)), // METRIC
        ColumnConstraint::LowerBoundary(Width::Fixed(12)), // VALUE
    ]);

    for (key, value) in metrics {
        table.add_row(vec![
            Cell::new(*key),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }

    table.trim_fmt().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reposcope_core::Priority;

    #[test]
    fn test_technologies_table_lists_every_category() {
        let mut technologies = TechnologyCategoryMap::default();
        technologies.push(Category::Frontend, "React-18.3.1");
        technologies.push(Category::Database, "PostgreSQL");
        technologies.push(Category::Database, "Supabase");

        let output = render_technologies_table(&technologies);

        assert!(output.contains("CATEGORY"));
        assert!(output.contains("TECHNOLOGIES"));
        for category in Category::ALL {
            assert!(output.contains(category.label()));
        }
        assert!(output.contains("React-18.3.1"));
        assert!(output.contains("PostgreSQL, Supabase"));
    }

    #[test]
    fn test_gaps_table() {
        let mut analyses = BTreeMap::new();
        analyses.insert(
            Category::Ai,
            GapCategoryAnalysis {
                current_technologies: vec![],
                identified_gaps: vec!["No AI integration detected".to_string()],
                recommendations: vec![],
                priority: Priority::Medium,
            },
        );

        let output = render_gaps_table(&analyses);
        assert!(output.contains("PRIORITY"));
        assert!(output.contains("AI"));
        assert!(output.contains("medium"));
        assert!(output.contains("No AI integration detected"));
    }

    #[test]
    fn test_recommendations_table() {
        let recs = vec![StrategicRecommendation {
            category: "security".to_string(),
            title: "Automate security scanning".to_string(),
            description: "Add dependency and secret scanning to CI".to_string(),
            priority: Priority::Medium,
            timeline: "1-2 months".to_string(),
            impact: "medium".to_string(),
        }];

        let output = render_recommendations_table(&recs);
        assert!(output.contains("TIMELINE"));
        assert!(output.contains("security"));
        assert!(output.contains("Automate security scanning"));
    }

    #[test]
    fn test_empty_tables() {
        assert_eq!(render_gaps_table(&BTreeMap::new()), "");
        assert_eq!(render_recommendations_table(&[]), "");
        assert_eq!(render_metrics_table(&[]), "");
    }
}
