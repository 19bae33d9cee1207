//! End-to-end pipeline tests over in-memory and on-disk repositories.

use std::fs;

use reposcope_core::{
    AnalysisDepth, AnalysisEngine, AnalysisRequest, Category, MemoryHost, PipelineStage,
    RepoScopeError, RepositoryRef,
};
use reposcope_core::report::GAP_PREFIX;

fn supabase_host() -> MemoryHost {
    MemoryHost::new(&RepositoryRef::new("acme", "notes"))
        .with_description("Note taking app")
        .with_file(
            "package.json",
            r#"{"dependencies": {"@supabase/supabase-js": "2.0.0", "tailwindcss": "3.3.0"}}"#,
        )
        .with_file(
            "tailwind.config.js",
            "module.exports = { content: ['./src/**/*.tsx'] }",
        )
        .with_file("src/app/page.tsx", "export default function Page() {}")
}

#[test]
fn supabase_tailwind_end_to_end() {
    let engine = AnalysisEngine::default();
    let request = AnalysisRequest::new("acme/notes");
    let report = engine.analyze_with_host(&supabase_host(), &request).unwrap();

    let categorization = &report.stage_results.categorization;
    let database = categorization.technologies.get(Category::Database);
    assert!(database.contains(&"PostgreSQL".to_string()));
    assert!(database.contains(&"Supabase".to_string()));
    assert!(categorization
        .technologies
        .get(Category::Frontend)
        .contains(&"Tailwind-CSS-3.3.0".to_string()));
    assert!(categorization.frameworks.contains(&"Tailwind CSS".to_string()));

    let database_gaps = &report.enhanced_tech_stack["database_gaps"];
    assert!(!database_gaps.contains(&"GAP: No database detected".to_string()));
    assert!(database_gaps.contains(&"GAP: No caching layer detected".to_string()));
    assert!(report.enhanced_tech_stack["database"].contains(&"Supabase".to_string()));
}

#[test]
fn report_metadata_and_summary() {
    let engine = AnalysisEngine::default();
    let mut request = AnalysisRequest::new("https://github.com/acme/notes")
        .with_depth(AnalysisDepth::Standard);
    request.focus_areas = vec!["security".to_string()];
    request.user_id = Some("user-42".to_string());

    let report = engine.analyze_with_host(&supabase_host(), &request).unwrap();

    assert_eq!(report.metadata.repository_url, "https://github.com/acme/notes");
    assert_eq!(report.metadata.user_id.as_deref(), Some("user-42"));
    assert_eq!(report.metadata.analysis_depth, AnalysisDepth::Standard);
    assert_eq!(report.metadata.focus_areas, vec!["security"]);
    assert_eq!(
        report.metadata.stages,
        vec!["exploration", "categorization", "gap_analysis"]
    );

    assert!(report.summary.success);
    assert_eq!(
        report.summary.total_technologies_detected,
        report.stage_results.categorization.technologies.total()
    );
    let gap_categories = report
        .stage_results
        .gap_analysis
        .gap_analysis
        .values()
        .filter(|a| !a.identified_gaps.is_empty())
        .count();
    assert_eq!(report.summary.total_gap_categories, gap_categories);

    // every category appears twice in the denormalized view
    assert_eq!(report.enhanced_tech_stack.len(), 16);
    for category in Category::ALL {
        assert!(report.enhanced_tech_stack.contains_key(category.as_str()));
        let gaps = &report.enhanced_tech_stack[&format!("{}_gaps", category.as_str())];
        assert!(gaps.iter().all(|g| g.starts_with("GAP: ")));
    }

    let exploration = &report.stage_results.exploration;
    assert_eq!(exploration.repository.full_name, "acme/notes");
    assert_eq!(exploration.files_fetched, 3);
    assert!(exploration.directories.contains(&"src/app".to_string()));
}

#[test]
fn gaps_view_holds_identified_gaps_not_recommendations() {
    let engine = AnalysisEngine::default();
    let report = engine
        .analyze_with_host(&supabase_host(), &AnalysisRequest::new("acme/notes"))
        .unwrap();

    for (category, analysis) in &report.stage_results.gap_analysis.gap_analysis {
        let listed = &report.enhanced_tech_stack[&format!("{}_gaps", category.as_str())];
        let expected: Vec<String> = analysis
            .identified_gaps
            .iter()
            .map(|g| format!("{}{}", GAP_PREFIX, g))
            .collect();
        assert_eq!(listed, &expected);
        for recommendation in &analysis.recommendations {
            assert!(!listed.iter().any(|g| g.ends_with(recommendation.as_str())));
        }
    }
}

#[test]
fn equivalent_url_forms_yield_same_stack() {
    let engine = AnalysisEngine::default();
    let forms = [
        "acme/notes",
        "github.com/acme/notes",
        "https://github.com/acme/notes",
        "https://github.com/acme/notes.git",
        "https://github.com/acme/notes/tree/main/src",
    ];

    let summaries: Vec<_> = forms
        .iter()
        .map(|url| {
            engine
                .summarize_with_host(&supabase_host(), &AnalysisRequest::new(*url))
                .unwrap()
        })
        .collect();

    for summary in &summaries[1..] {
        assert_eq!(summary.repository, summaries[0].repository);
        assert_eq!(summary.technologies, summaries[0].technologies);
        assert_eq!(summary.frameworks, summaries[0].frameworks);
    }
}

#[test]
fn pattern_cap_never_throttles_critical_files() {
    let mut host = MemoryHost::new(&RepositoryRef::new("acme", "big"))
        .with_file("package.json", r#"{"dependencies": {"react": "18.3.1"}}"#)
        .with_file("Dockerfile", "FROM node:20")
        .with_file("README.md", "# big");
    for i in 0..200 {
        host = host.with_file(format!("src/components/C{:03}.tsx", i), "export {}");
    }

    let engine = AnalysisEngine::default();
    let report = engine
        .analyze_with_host(&host, &AnalysisRequest::new("acme/big"))
        .unwrap();

    let exploration = &report.stage_results.exploration;
    assert_eq!(exploration.total_files_scanned, 203);
    assert_eq!(exploration.files_fetched, 53);
    assert!(report
        .stage_results
        .categorization
        .technologies
        .get(Category::Infrastructure)
        .contains(&"Docker".to_string()));
}

#[test]
fn failing_file_is_omitted_not_fatal() {
    let host = supabase_host().with_failing_file("tailwind.config.js");
    let engine = AnalysisEngine::default();
    let report = engine
        .analyze_with_host(&host, &AnalysisRequest::new("acme/notes"))
        .unwrap();

    assert_eq!(report.stage_results.exploration.files_fetched, 2);
    // the dependency still marks Tailwind as a framework
    assert!(report
        .stage_results
        .categorization
        .frameworks
        .contains(&"Tailwind CSS".to_string()));
}

#[test]
fn metadata_failure_aborts_run() {
    let host = supabase_host().with_metadata_failure("GitHub API returned 404: Not Found");
    let engine = AnalysisEngine::default();
    let err = engine
        .analyze_with_host(&host, &AnalysisRequest::new("acme/notes"))
        .unwrap_err();

    assert_eq!(err.failed_stage(), Some(PipelineStage::Explore));
    assert!(matches!(err.root_cause(), RepoScopeError::HostRequest { .. }));
    assert!(err.to_string().contains("404"));
}

#[test]
fn local_checkout_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(
        root.join("package.json"),
        r#"{"dependencies": {"next": "^14.2.3", "react": "^18.3.1"}}"#,
    )
    .unwrap();
    fs::write(root.join("package-lock.json"), "{}").unwrap();
    fs::create_dir_all(root.join("src/app")).unwrap();
    fs::write(root.join("src/app/page.tsx"), "export default function Page() {}").unwrap();
    fs::create_dir_all(root.join("node_modules/react")).unwrap();
    fs::write(root.join("node_modules/react/index.js"), "module.exports = {}").unwrap();

    let engine = AnalysisEngine::default();
    let request = AnalysisRequest::new(root.display().to_string());
    let report = engine.analyze_local(root, &request).unwrap();

    let categorization = &report.stage_results.categorization;
    assert_eq!(categorization.frameworks, vec!["Next.js", "React"]);
    assert_eq!(categorization.package_managers, vec!["npm"]);
    assert_eq!(categorization.languages, vec!["TypeScript"]);
    assert_eq!(report.stage_results.exploration.total_files_scanned, 3);
}

#[test]
fn missing_local_path_fails_in_explore_stage() {
    let engine = AnalysisEngine::default();
    let err = engine
        .analyze_local(
            std::path::Path::new("/definitely/not/here"),
            &AnalysisRequest::new("local"),
        )
        .unwrap_err();
    assert_eq!(err.failed_stage(), Some(PipelineStage::Explore));
}

#[test]
fn report_serializes_to_json() {
    let engine = AnalysisEngine::default();
    let report = engine
        .analyze_with_host(&supabase_host(), &AnalysisRequest::new("acme/notes"))
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["metadata"]["analysis_id"].is_string());
    assert_eq!(json["summary"]["success"], true);
    assert!(json["stage_results"]["gap_analysis"]["gap_analysis"]["database"]["priority"].is_string());
    assert!(json["enhanced_tech_stack"]["frontend_gaps"].is_array());
}
