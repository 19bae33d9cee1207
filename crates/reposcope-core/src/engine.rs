//! Analysis engine: the orchestrator that sequences the pipeline.
//!
//! One run walks `ParseUrl -> Explore -> Analyze -> GapAnalyze -> Assemble`.
//! Any stage failure aborts the run with [`RepoScopeError::StageFailed`]
//! naming the stage; no partial report is returned. The whole run shares one
//! wall-clock [`Deadline`], checked before every stage and every hosting-API
//! call.

use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::budget::Deadline;
use crate::config::GlobalConfig;
use crate::errors::RepoScopeError;
use crate::explorer::{explore, ExploreOptions};
use crate::host::{GitHubHost, LocalHost, RepositoryHost};
use crate::repo_url::{parse_repository_url, RepositoryRef};
use crate::report::{AnalysisReport, AnalysisRequest, StackSummary};
use crate::types::ExplorationResult;
use crate::{gaps, stack};

// ============================================================================
// Stages
// ============================================================================

/// A stage of the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    ParseUrl,
    Explore,
    Analyze,
    GapAnalyze,
    Assemble,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParseUrl => "URL parsing",
            Self::Explore => "repository exploration",
            Self::Analyze => "technology categorization",
            Self::GapAnalyze => "gap analysis",
            Self::Assemble => "report assembly",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run one stage: check the deadline, log the boundary, wrap any failure.
fn run_stage<T>(
    stage: PipelineStage,
    deadline: &Deadline,
    work: impl FnOnce() -> Result<T, RepoScopeError>,
) -> Result<T, RepoScopeError> {
    let wrap = |source: RepoScopeError| RepoScopeError::StageFailed {
        stage,
        source: Box::new(source),
    };

    deadline.check().map_err(wrap)?;
    tracing::info!(stage = %stage, "Stage started");

    let started = std::time::Instant::now();
    match work() {
        Ok(value) => {
            tracing::info!(
                stage = %stage,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Stage completed"
            );
            Ok(value)
        }
        Err(e) => {
            tracing::error!(stage = %stage, error = %e, "Stage failed");
            Err(wrap(e))
        }
    }
}

/// Attribute a failure that happens before `stage` runs (opening its host)
/// to that stage, without logging a stage boundary.
fn prepare_stage<T>(
    stage: PipelineStage,
    result: Result<T, RepoScopeError>,
) -> Result<T, RepoScopeError> {
    result.map_err(|source| {
        tracing::error!(stage = %stage, error = %source, "Stage setup failed");
        RepoScopeError::StageFailed {
            stage,
            source: Box::new(source),
        }
    })
}

// ============================================================================
// Tool Surface
// ============================================================================

/// The externally callable operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Full pipeline, returns an [`AnalysisReport`].
    AnalyzeComprehensive,
    /// Exploration and categorization, returns a [`StackSummary`].
    Analyze,
}

impl Tool {
    pub const ALL: [Tool; 2] = [Tool::AnalyzeComprehensive, Tool::Analyze];

    pub fn name(&self) -> &'static str {
        match self {
            Self::AnalyzeComprehensive => "analyze_github_repository_comprehensive",
            Self::Analyze => "analyze_github_repository",
        }
    }
}

impl FromStr for Tool {
    type Err = RepoScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| {
                RepoScopeError::InvalidArgument(format!(
                    "Unknown tool `{}`. Available tools: {}",
                    s,
                    Tool::ALL.map(|t| t.name()).join(", ")
                ))
            })
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Entry point for repository analysis.
///
/// Holds configuration only; every run builds its own hosting client and
/// deadline, so one engine can serve concurrent callers.
///
/// # Example
///
/// ```ignore
/// use reposcope_core::{AnalysisEngine, AnalysisRequest};
///
/// let engine = AnalysisEngine::with_defaults()?;
/// let report = engine.analyze_repository_comprehensive(
///     &AnalysisRequest::new("vercel/next.js").with_token(token),
/// )?;
/// println!("{} technologies", report.summary.total_technologies_detected);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    config: GlobalConfig,
}

impl AnalysisEngine {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Create an engine from a validated configuration.
    ///
    /// Validation warnings are logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration has invalid values.
    pub fn from_global_config(config: GlobalConfig) -> Result<Self, RepoScopeError> {
        for warning in config.validate()? {
            tracing::warn!("{}", warning);
        }
        Ok(Self { config })
    }

    /// Create an engine with configuration from `~/.reposcope/config.yaml`,
    /// or defaults when the file does not exist.
    pub fn with_defaults() -> anyhow::Result<Self> {
        let config = GlobalConfig::load_default()?;
        Ok(Self::from_global_config(config)?)
    }

    /// Create an engine with configuration from a specific path.
    pub fn with_config(path: &Path) -> anyhow::Result<Self> {
        let config = GlobalConfig::from_path(path)?;
        Ok(Self::from_global_config(config)?)
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Run the full pipeline against GitHub.
    ///
    /// # Errors
    ///
    /// Returns [`RepoScopeError::StageFailed`] naming the failed stage.
    pub fn analyze_repository_comprehensive(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisReport, RepoScopeError> {
        let deadline = self.start_deadline();
        let reference = self.parse_url(request, &deadline)?;
        let host = self.github_host(request, &deadline)?;
        self.run_pipeline(&host, &reference, request, &deadline)
    }

    /// Explore and categorize a GitHub repository without gap analysis.
    pub fn analyze_repository(
        &self,
        request: &AnalysisRequest,
    ) -> Result<StackSummary, RepoScopeError> {
        let deadline = self.start_deadline();
        let reference = self.parse_url(request, &deadline)?;
        let host = self.github_host(request, &deadline)?;
        self.run_summary(&host, &reference, request, &deadline)
    }

    /// Run the full pipeline against any host. The request URL still has to
    /// parse; it names the repository on that host.
    pub fn analyze_with_host<H: RepositoryHost + ?Sized>(
        &self,
        host: &H,
        request: &AnalysisRequest,
    ) -> Result<AnalysisReport, RepoScopeError> {
        let deadline = self.start_deadline();
        let reference = self.parse_url(request, &deadline)?;
        self.run_pipeline(host, &reference, request, &deadline)
    }

    /// [`Self::analyze_repository`] against any host.
    pub fn summarize_with_host<H: RepositoryHost + ?Sized>(
        &self,
        host: &H,
        request: &AnalysisRequest,
    ) -> Result<StackSummary, RepoScopeError> {
        let deadline = self.start_deadline();
        let reference = self.parse_url(request, &deadline)?;
        self.run_summary(host, &reference, request, &deadline)
    }

    /// Run the full pipeline over a local checkout.
    ///
    /// The request URL is ignored for host lookup and only recorded in the
    /// report metadata.
    pub fn analyze_local(
        &self,
        path: &Path,
        request: &AnalysisRequest,
    ) -> Result<AnalysisReport, RepoScopeError> {
        let deadline = self.start_deadline();
        let host = prepare_stage(PipelineStage::Explore, LocalHost::open(path))?;
        let reference = host.reference();
        self.run_pipeline(&host, &reference, request, &deadline)
    }

    /// [`Self::analyze_repository`] over a local checkout.
    pub fn summarize_local(
        &self,
        path: &Path,
        request: &AnalysisRequest,
    ) -> Result<StackSummary, RepoScopeError> {
        let deadline = self.start_deadline();
        let host = prepare_stage(PipelineStage::Explore, LocalHost::open(path))?;
        let reference = host.reference();
        self.run_summary(&host, &reference, request, &deadline)
    }

    /// Dispatch a tool call by name and serialize its result.
    pub fn call_tool(
        &self,
        tool: Tool,
        request: &AnalysisRequest,
    ) -> Result<serde_json::Value, RepoScopeError> {
        let value = match tool {
            Tool::AnalyzeComprehensive => {
                serde_json::to_value(self.analyze_repository_comprehensive(request)?)?
            }
            Tool::Analyze => serde_json::to_value(self.analyze_repository(request)?)?,
        };
        Ok(value)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn start_deadline(&self) -> Deadline {
        Deadline::start(self.config.orchestration.budget())
    }

    fn github_host(
        &self,
        request: &AnalysisRequest,
        deadline: &Deadline,
    ) -> Result<GitHubHost, RepoScopeError> {
        prepare_stage(
            PipelineStage::Explore,
            GitHubHost::new(&request.github_token, &self.config.github, deadline),
        )
    }

    fn parse_url(
        &self,
        request: &AnalysisRequest,
        deadline: &Deadline,
    ) -> Result<RepositoryRef, RepoScopeError> {
        run_stage(PipelineStage::ParseUrl, deadline, || {
            parse_repository_url(&request.repository_url)
        })
    }

    fn explore_stage<H: RepositoryHost + ?Sized>(
        &self,
        host: &H,
        reference: &RepositoryRef,
        request: &AnalysisRequest,
        deadline: &Deadline,
    ) -> Result<ExplorationResult, RepoScopeError> {
        let options = ExploreOptions::for_depth(&self.config.exploration, request.analysis_depth);
        tracing::debug!(
            repository = %reference,
            depth = %request.analysis_depth,
            pattern_cap = options.pattern_cap,
            "Exploring repository"
        );
        run_stage(PipelineStage::Explore, deadline, || {
            explore(host, reference, &options, deadline)
        })
    }

    fn run_pipeline<H: RepositoryHost + ?Sized>(
        &self,
        host: &H,
        reference: &RepositoryRef,
        request: &AnalysisRequest,
        deadline: &Deadline,
    ) -> Result<AnalysisReport, RepoScopeError> {
        let exploration = self.explore_stage(host, reference, request, deadline)?;
        let structured = run_stage(PipelineStage::Analyze, deadline, || {
            Ok(stack::analyze(&exploration))
        })?;
        let enhanced = run_stage(PipelineStage::GapAnalyze, deadline, || {
            Ok(gaps::analyze(structured))
        })?;
        let report = run_stage(PipelineStage::Assemble, deadline, || {
            Ok(AnalysisReport::assemble(request, &exploration, enhanced))
        })?;

        tracing::info!(
            repository = %reference,
            technologies = report.summary.total_technologies_detected,
            gap_categories = report.summary.total_gap_categories,
            elapsed_ms = deadline.elapsed().as_millis() as u64,
            "Analysis complete"
        );
        Ok(report)
    }

    fn run_summary<H: RepositoryHost + ?Sized>(
        &self,
        host: &H,
        reference: &RepositoryRef,
        request: &AnalysisRequest,
        deadline: &Deadline,
    ) -> Result<StackSummary, RepoScopeError> {
        let exploration = self.explore_stage(host, reference, request, deadline)?;
        run_stage(PipelineStage::Analyze, deadline, || {
            Ok(StackSummary::from_stack(
                request.repository_url.clone(),
                stack::analyze(&exploration),
            ))
        })
    }
}
