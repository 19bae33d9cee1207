//! Integration tests for `reposcope analyze` and `reposcope scan`.
//!
//! All runs use `--path` against a temporary checkout so no network access
//! is needed.

mod common;

use predicates::prelude::*;
use tempfile::TempDir;

use common::{create_next_app, reposcope_cmd};

#[test]
fn test_analyze_local_human_output() {
    let temp = TempDir::new().expect("create temp dir");
    let repo = temp.path().join("storefront");
    create_next_app(&repo);

    reposcope_cmd(temp.path())
        .args(["analyze", "--path"])
        .arg(&repo)
        .assert()
        .success()
        .stdout(predicate::str::contains("[ok] Analyzed local/storefront"))
        .stdout(predicate::str::contains("TECHNOLOGIES"))
        .stdout(predicate::str::contains("Next.js-14.2.3"))
        .stdout(predicate::str::contains("GAPS"))
        .stdout(predicate::str::contains("STRATEGIC RECOMMENDATIONS"))
        .stdout(predicate::str::contains("Package managers: npm"));
}

#[test]
fn test_analyze_local_json_report() {
    let temp = TempDir::new().expect("create temp dir");
    let repo = temp.path().join("storefront");
    create_next_app(&repo);

    let output = reposcope_cmd(temp.path())
        .args(["analyze", "--json", "--depth", "basic", "--focus", "security", "--path"])
        .arg(&repo)
        .output()
        .expect("run reposcope");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is a JSON report");

    assert_eq!(report["summary"]["success"], true);
    assert_eq!(report["metadata"]["analysis_depth"], "basic");
    assert_eq!(report["metadata"]["focus_areas"][0], "security");

    let categorization = &report["stage_results"]["categorization"];
    let frameworks: Vec<&str> = categorization["frameworks"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert!(frameworks.contains(&"Next.js"));
    assert!(frameworks.contains(&"Tailwind CSS"));
    assert_eq!(categorization["package_managers"][0], "npm");

    let infrastructure = report["enhanced_tech_stack"]["infrastructure"]
        .as_array()
        .unwrap();
    assert!(infrastructure.iter().any(|v| v == "Docker"));

    // node_modules is never scanned
    assert_eq!(
        report["stage_results"]["exploration"]["total_files_scanned"],
        5
    );
}

#[test]
fn test_scan_local_json_summary() {
    let temp = TempDir::new().expect("create temp dir");
    let repo = temp.path().join("storefront");
    create_next_app(&repo);

    let output = reposcope_cmd(temp.path())
        .args(["scan", "--json", "--path"])
        .arg(&repo)
        .output()
        .expect("run reposcope");
    assert!(output.status.success());

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is a JSON summary");
    assert_eq!(summary["repository"]["full_name"], "local/storefront");
    assert!(summary.get("gap_analysis").is_none());
    let dev_tools = summary["dev_tools"].as_array().unwrap();
    assert!(dev_tools.iter().any(|v| v == "TypeScript"));
    assert!(dev_tools.iter().any(|v| v == "ESLint"));
}

#[test]
fn test_scan_human_output_suggests_analyze() {
    let temp = TempDir::new().expect("create temp dir");
    let repo = temp.path().join("storefront");
    create_next_app(&repo);

    reposcope_cmd(temp.path())
        .args(["scan", "--path"])
        .arg(&repo)
        .assert()
        .success()
        .stdout(predicate::str::contains("[ok] Scanned local/storefront"))
        .stdout(predicate::str::contains("[hint]"));
}

#[test]
fn test_missing_path_fails_in_exploration() {
    let temp = TempDir::new().expect("create temp dir");

    reposcope_cmd(temp.path())
        .args(["analyze", "--path"])
        .arg(temp.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("repository exploration"))
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_invalid_repository_url_fails_before_network() {
    let temp = TempDir::new().expect("create temp dir");

    reposcope_cmd(temp.path())
        .args(["analyze", "justone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("URL parsing"))
        .stderr(predicate::str::contains("owner/repo"));
}

#[test]
fn test_analyze_requires_a_target() {
    let temp = TempDir::new().expect("create temp dir");

    reposcope_cmd(temp.path()).arg("analyze").assert().failure();
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().expect("create temp dir");

    reposcope_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("tool"))
        .stdout(predicate::str::contains("config"));
}
