//! CLI definition and command dispatch for reposcope.
//!
//! This module defines the command-line interface using `clap` and provides
//! the `run()` function that dispatches commands to the engine.
//!
//! ## Configuration Precedence
//!
//! Configuration is resolved with the following precedence (highest to lowest):
//! 1. CLI flags (e.g., `--config`, `--verbose`, `--token`)
//! 2. Environment variables (`REPOSCOPE_CONFIG`, `REPOSCOPE_VERBOSE`, `GITHUB_TOKEN`)
//! 3. Config file (`~/.reposcope/config.yaml` or path from `--config`)
//! 4. Built-in defaults

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::ui::progress::format_duration;
use crate::ui::{format, table, ColorMode, MessageType, Progress, ProgressMode, Style};

use reposcope_core::{
    AnalysisDepth, AnalysisEngine, AnalysisReport, AnalysisRequest, Category, GlobalConfig,
    RepoScopeError, RepositoryInfo, StackSummary, Tool,
};

// ============================================================================
// CLI Definition
// ============================================================================

/// Version string including git commit hash
const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// reposcope – repository tech-stack detection and gap analysis
#[derive(Parser, Debug)]
#[command(name = "reposcope")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, env = "REPOSCOPE_VERBOSE")]
    pub verbose: bool,

    /// Suppress progress and informational messages
    #[arg(short, long, global = true, env = "REPOSCOPE_QUIET")]
    pub quiet: bool,

    /// Path to configuration file (default: ~/.reposcope/config.yaml)
    #[arg(long, global = true, env = "REPOSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Color output mode
    #[arg(long, global = true, env = "REPOSCOPE_COLOR", value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

/// Where and how to analyze; shared by `analyze` and `scan`.
#[derive(clap::Args, Debug)]
pub struct TargetArgs {
    /// Repository as `owner/repo`, `github.com/owner/repo` or a GitHub URL
    #[arg(required_unless_present = "path")]
    pub repository: Option<String>,

    /// Analyze a local checkout instead of fetching from GitHub
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// GitHub access token (unauthenticated requests when empty)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, default_value = "")]
    pub token: String,

    /// Analysis depth: basic, standard or comprehensive
    #[arg(short, long, default_value = "comprehensive")]
    pub depth: AnalysisDepth,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Detect the tech stack and analyze capability gaps
    #[command(after_help = r#"EXAMPLES:
    # Analyze a public repository
    reposcope analyze vercel/next.js

    # Authenticated, with a shallower file selection
    GITHUB_TOKEN=ghp_... reposcope analyze https://github.com/supabase/supabase --depth basic

    # Analyze a local checkout offline
    reposcope analyze --path .

    # Record focus areas and a requester in the report metadata
    reposcope analyze acme/app --focus security,performance --user-id u-42

    # Machine-readable report
    reposcope analyze acme/app --json | jq '.summary'
"#)]
    Analyze {
        #[command(flatten)]
        target: TargetArgs,

        /// Focus areas recorded in the report metadata (comma-separated)
        #[arg(long, value_delimiter = ',')]
        focus: Vec<String>,

        /// Requester id passed through to the report metadata
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Detect the tech stack only (no gap analysis)
    #[command(after_help = r#"EXAMPLES:
    # Quick stack summary
    reposcope scan acme/app

    # Local checkout as JSON
    reposcope scan --path ../app --json
"#)]
    Scan {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Call an analysis operation with a JSON request and print the JSON response
    #[command(after_help = r#"EXAMPLES:
    # Request from a file
    reposcope tool analyze_github_repository_comprehensive --input request.json

    # Request from stdin
    echo '{"repository_url": "acme/app"}' | reposcope tool analyze_github_repository

TOOLS:
    analyze_github_repository_comprehensive   full report with gap analysis
    analyze_github_repository                 stack summary only

REQUEST FIELDS:
    repository_url (required), github_token, analysis_depth, focus_areas, user_id
"#)]
    Tool {
        /// Tool name
        name: String,

        /// JSON request file, or `-` for stdin
        #[arg(long, short, default_value = "-")]
        input: String,

        /// Token used when the request carries none
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, default_value = "")]
        token: String,
    },

    /// Manage reposcope configuration (validate, show resolved config)
    #[command(after_help = r#"EXAMPLES:
    # Validate the configuration file
    reposcope config check

    # Show resolved configuration
    reposcope config show --json
"#)]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors/warnings
    Check {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration (file merged over defaults)
    Show {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

// ============================================================================
// Run function
// ============================================================================

/// Run the CLI application.
///
/// Parses command-line arguments, creates an `AnalysisEngine`, and dispatches
/// to the appropriate command handler.
///
/// # Returns
///
/// Returns `ExitCode::SUCCESS` on success, or `ExitCode::FAILURE` on error.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Warnings always; debug with --verbose; errors only with --quiet.
    // Logs go to stderr so `--json` output stays parseable.
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = format!("reposcope_core={},reposcope_github={}", log_level, log_level);

    tracing_subscriber::fmt()
        .with_env_filter(&filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let style = Style::new(cli.color);

    // Config commands report on the file themselves instead of failing at
    // engine construction.
    if let Command::Config { action } = &cli.command {
        let result = handle_config(&style, cli.config.as_deref(), action);
        return finish(&style, result);
    }

    let engine = match &cli.config {
        Some(config_path) => AnalysisEngine::with_config(config_path),
        None => AnalysisEngine::with_defaults(),
    };

    let engine = match engine {
        Ok(engine) => engine,
        Err(e) => {
            let hint = if let Some(path) = &cli.config {
                format!("Check your config at {}", path.display())
            } else {
                "Check your global config at ~/.reposcope/config.yaml".to_string()
            };
            eprintln!(
                "{}",
                style.error_with_context(
                    "Failed to initialize reposcope engine",
                    Some(&e.to_string()),
                    Some(&hint),
                )
            );
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Command::Analyze {
            target,
            focus,
            user_id,
        } => handle_analyze(&style, &engine, target, focus, user_id, cli.quiet),
        Command::Scan { target } => handle_scan(&style, &engine, target, cli.quiet),
        Command::Tool { name, input, token } => handle_tool(&engine, &name, &input, token),
        Command::Config { .. } => Ok(()),
    };

    finish(&style, result)
}

fn finish(style: &Style, result: Result<(), RepoScopeError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let cause = e.root_cause().to_string();
            let headline = match e.failed_stage() {
                Some(stage) => format!("Repository analysis failed during {}", stage),
                None => e.to_string(),
            };
            let cause = e.failed_stage().map(|_| cause.as_str());
            eprintln!("{}", style.error_with_context(&headline, cause, hint_for(&e)));
            ExitCode::FAILURE
        }
    }
}

/// Actionable next step for the common failure kinds.
fn hint_for(err: &RepoScopeError) -> Option<&'static str> {
    match err.root_cause() {
        RepoScopeError::InvalidRepositoryUrl { .. } => {
            Some("Use `owner/repo` or `https://github.com/owner/repo`")
        }
        RepoScopeError::HostTimeout { .. } | RepoScopeError::BudgetExceeded { .. } => Some(
            "Raise github.requestTimeoutSecs or orchestration.budgetSecs in ~/.reposcope/config.yaml",
        ),
        RepoScopeError::HostRequest { message, .. }
            if message.contains("403") || message.contains("rate limit") =>
        {
            Some("Set GITHUB_TOKEN to raise the API rate limit")
        }
        RepoScopeError::HostRequest { message, .. } if message.contains("404") => {
            Some("Check the repository name; private repositories need a token")
        }
        RepoScopeError::PathNotFound(_) => Some("Pass an existing directory to --path"),
        _ => None,
    }
}

// ============================================================================
// Command handlers
// ============================================================================

fn build_request(target: &TargetArgs) -> AnalysisRequest {
    let repository_url = match (&target.repository, &target.path) {
        (Some(repository), _) => repository.clone(),
        (None, Some(path)) => path.display().to_string(),
        (None, None) => String::new(),
    };
    AnalysisRequest::new(repository_url)
        .with_token(target.token.clone())
        .with_depth(target.depth)
}

fn handle_analyze(
    style: &Style,
    engine: &AnalysisEngine,
    target: TargetArgs,
    focus: Vec<String>,
    user_id: Option<String>,
    quiet: bool,
) -> Result<(), RepoScopeError> {
    let mut request = build_request(&target);
    request.focus_areas = focus;
    request.user_id = user_id;

    let mode = ProgressMode::detect(quiet, target.json, style.color_mode());
    let progress = Progress::spinner(
        &format!("Analyzing {}...", request.repository_url),
        mode,
    );

    let result = match &target.path {
        Some(path) => engine.analyze_local(path, &request),
        None => engine.analyze_repository_comprehensive(&request),
    };
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            progress.finish_clear();
            return Err(e);
        }
    };

    if target.json {
        progress.finish_clear();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    progress.finish_with_message(&style.message(
        MessageType::Ok,
        &format!(
            "Analyzed {} ({}) in {}",
            style.repository(&report.stage_results.exploration.repository.full_name),
            report.metadata.analysis_depth,
            format_duration(progress.elapsed())
        ),
    ));
    print_report(style, &report);
    Ok(())
}

fn handle_scan(
    style: &Style,
    engine: &AnalysisEngine,
    target: TargetArgs,
    quiet: bool,
) -> Result<(), RepoScopeError> {
    let request = build_request(&target);

    let mode = ProgressMode::detect(quiet, target.json, style.color_mode());
    let progress = Progress::spinner(&format!("Scanning {}...", request.repository_url), mode);

    let result = match &target.path {
        Some(path) => engine.summarize_local(path, &request),
        None => engine.analyze_repository(&request),
    };
    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            progress.finish_clear();
            return Err(e);
        }
    };

    if target.json {
        progress.finish_clear();
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    progress.finish_with_message(&style.message(
        MessageType::Ok,
        &format!(
            "Scanned {} in {}",
            style.repository(&summary.repository.full_name),
            format_duration(progress.elapsed())
        ),
    ));
    print_summary(style, &summary);
    Ok(())
}

fn handle_tool(
    engine: &AnalysisEngine,
    name: &str,
    input: &str,
    token: String,
) -> Result<(), RepoScopeError> {
    let tool = Tool::from_str(name)?;

    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };

    let mut request: AnalysisRequest = serde_json::from_str(&raw)?;
    if request.github_token.is_empty() {
        request.github_token = token;
    }
    tracing::debug!(tool = tool.name(), request = ?request, "Tool call");

    let response = engine.call_tool(tool, &request)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

// ============================================================================
// Human-readable output
// ============================================================================

fn print_repository(style: &Style, repository: &RepositoryInfo) {
    println!("{}", style.section("REPOSITORY"));
    println!("{}", style.key_value("Name", &style.repository(&repository.full_name)));
    if let Some(description) = &repository.description {
        println!("{}", style.key_value("Description", &format::truncate_str(description, 80)));
    }
    if let Some(language) = &repository.language {
        println!("{}", style.key_value("Primary language", language));
    }
    println!("{}", style.key_value("Default branch", &repository.default_branch));
    println!("{}", style.key_value("Size", &format::format_kilobytes(repository.size_kb)));
    println!();
}

fn print_lists(style: &Style, frameworks: &[String], languages: &[String], managers: &[String], tools: &[String]) {
    println!("{}", style.key_value("Frameworks", &format::join_or_dash(frameworks)));
    println!("{}", style.key_value("Languages", &format::join_or_dash(languages)));
    println!("{}", style.key_value("Package managers", &format::join_or_dash(managers)));
    println!("{}", style.key_value("Dev tools", &format::join_or_dash(tools)));
    println!();
}

fn print_report(style: &Style, report: &AnalysisReport) {
    let exploration = &report.stage_results.exploration;
    let categorization = &report.stage_results.categorization;
    let gaps = &report.stage_results.gap_analysis;

    println!();
    print_repository(style, &exploration.repository);
    if exploration.tree_truncated {
        println!(
            "{}",
            style.message(
                MessageType::Warn,
                "File tree was truncated by the host; results cover a partial listing"
            )
        );
        println!();
    }

    println!("{}", style.section("TECHNOLOGIES"));
    println!("{}", table::render_technologies_table(&categorization.technologies));
    println!();
    print_lists(
        style,
        &categorization.frameworks,
        &categorization.languages,
        &categorization.package_managers,
        &categorization.dev_tools,
    );

    println!("{}", style.section("GAPS"));
    println!("{}", table::render_gaps_table(&gaps.gap_analysis));
    println!();
    for (category, analysis) in &gaps.gap_analysis {
        if analysis.identified_gaps.is_empty() {
            continue;
        }
        println!("{} ({})", category.label(), style.priority(analysis.priority));
        for gap in &analysis.identified_gaps {
            println!("{}", style.list_item("!", gap));
        }
        for recommendation in &analysis.recommendations {
            println!("{}", style.list_item("+", recommendation));
        }
    }
    println!();

    println!("{}", style.section("STRATEGIC RECOMMENDATIONS"));
    println!("{}", table::render_recommendations_table(&gaps.strategic_recommendations));
    println!();

    println!("{}", style.section("KEY DECISIONS"));
    for decision in &gaps.key_decisions {
        println!("{}", style.list_item("-", decision));
    }
    println!();

    println!("{}", style.section("MIGRATION NOTES"));
    for note in &gaps.migration_notes {
        println!("{}", style.list_item("-", note));
    }
    println!();

    let summary = &report.summary;
    println!("{}", style.section("SUMMARY"));
    println!(
        "{}",
        table::render_metrics_table(&[
            (
                "Files analyzed",
                format!("{}/{}", exploration.files_fetched, exploration.total_files_scanned)
            ),
            ("Dependencies", categorization.dependency_count.to_string()),
            ("Technologies", summary.total_technologies_detected.to_string()),
            ("Gap categories", format!("{}/{}", summary.total_gap_categories, Category::ALL.len())),
            ("High priority", summary.high_priority_recommendations.to_string()),
        ])
    );
    println!();
    println!(
        "{}",
        style.message_detail("Analysis", &report.metadata.analysis_id.to_string())
    );
    println!(
        "{}",
        style.message_detail(
            "Analyzed at",
            &report.metadata.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
        )
    );
}

fn print_summary(style: &Style, summary: &StackSummary) {
    println!();
    print_repository(style, &summary.repository);

    println!("{}", style.section("TECHNOLOGIES"));
    println!("{}", table::render_technologies_table(&summary.technologies));
    println!();
    print_lists(
        style,
        &summary.frameworks,
        &summary.languages,
        &summary.package_managers,
        &summary.dev_tools,
    );

    println!(
        "{}",
        table::render_metrics_table(&[
            ("Files analyzed", summary.files_analyzed.to_string()),
            ("Dependencies", summary.dependency_count.to_string()),
            ("Technologies", summary.technologies.total().to_string()),
        ])
    );
    println!();
    println!(
        "{}",
        style.message(
            MessageType::Hint,
            "Run `reposcope analyze` for gap analysis and recommendations"
        )
    );
}

// ============================================================================
// Config command handler
// ============================================================================

fn handle_config(
    style: &Style,
    config_path: Option<&Path>,
    action: &ConfigAction,
) -> Result<(), RepoScopeError> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => GlobalConfig::default_path(),
    };
    match action {
        ConfigAction::Check { json } => handle_config_check(style, path.as_deref(), *json),
        ConfigAction::Show { json } => handle_config_show(style, path.as_deref(), *json),
    }
}

/// Validate the configuration file and report errors/warnings.
fn handle_config_check(
    style: &Style,
    path: Option<&Path>,
    json: bool,
) -> Result<(), RepoScopeError> {
    let exists = path.map(Path::exists).unwrap_or(false);

    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    match load_config(path) {
        Ok(config) => match config.validate() {
            Ok(w) => warnings = w,
            Err(e) => errors.push(e.to_string()),
        },
        Err(e) => errors.push(e.to_string()),
    }

    if json {
        let validation = serde_json::json!({
            "path": path.map(|p| p.display().to_string()),
            "exists": exists,
            "valid": errors.is_empty(),
            "warnings": warnings,
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&validation)?);
    } else {
        let location = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<no home directory>".to_string());
        let status = if !exists {
            "-"
        } else if errors.is_empty() {
            "✓"
        } else {
            "✗"
        };
        println!(
            "{}",
            style.message(MessageType::Info, "Checked 1 configuration source")
        );
        println!("  {} config file ({})", status, location);
        if !exists {
            println!("{}", style.message_detail("Note", "file not found, defaults apply"));
        }
        println!();

        if !warnings.is_empty() {
            println!(
                "{}",
                style.message(MessageType::Warn, &format!("{} warning(s):", warnings.len()))
            );
            for warning in &warnings {
                println!("  • {}", warning);
            }
            println!();
        }

        if !errors.is_empty() {
            println!(
                "{}",
                style.message(MessageType::Err, &format!("{} error(s):", errors.len()))
            );
            for error in &errors {
                println!("  • {}", error);
            }
            println!();
        }

        if errors.is_empty() && warnings.is_empty() {
            println!("{}", style.message(MessageType::Ok, "Configuration is valid"));
        } else if errors.is_empty() {
            println!(
                "{}",
                style.message(MessageType::Ok, "Configuration is valid with warnings")
            );
        }
    }

    if !errors.is_empty() {
        return Err(RepoScopeError::InvalidConfiguration {
            message: format!("{} configuration error(s) found", errors.len()),
            hint: "Fix the listed values and rerun `reposcope config check`".to_string(),
        });
    }

    Ok(())
}

/// Show resolved configuration (file merged over defaults).
fn handle_config_show(
    style: &Style,
    path: Option<&Path>,
    json: bool,
) -> Result<(), RepoScopeError> {
    let resolved = load_config(path)?;
    let pretty = serde_json::to_string_pretty(&resolved)?;

    if !json {
        let source = match path {
            Some(p) if p.exists() => p.display().to_string(),
            _ => "built-in defaults".to_string(),
        };
        println!(
            "{}",
            style.message(MessageType::Info, &format!("Resolved configuration ({}):", source))
        );
        println!();
    }
    println!("{}", pretty);

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GlobalConfig, RepoScopeError> {
    match path {
        Some(path) => GlobalConfig::from_path(path),
        None => Ok(GlobalConfig::default()),
    }
}
