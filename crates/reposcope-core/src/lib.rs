//! # reposcope-core
//!
//! Repository tech-stack detection and gap analysis.
//!
//! This crate explores a hosted repository (or a local checkout), infers its
//! technology stack from manifests, configuration files and paths, and
//! compares each technology category against a checklist of expected
//! capabilities. It is consumed by the `reposcope` CLI.
//!
//! ## Main Types
//!
//! - [`AnalysisEngine`] – entry point; runs the pipeline for one request
//! - [`AnalysisRequest`] / [`AnalysisReport`] – operation input and output
//! - [`RepositoryHost`] – the hosting-API seam (GitHub, local, in-memory)
//! - [`RepoScopeError`] – domain-specific error type
//!
//! ## Modules
//!
//! - [`explorer`] – file selection and fetching
//! - [`stack`] – technology analyzer and its rule tables
//! - [`gaps`] – gap analysis engine
//! - [`engine`] – the orchestrator
//! - [`report`] – request and report types
//! - [`config`] – global configuration (`~/.reposcope/config.yaml`)
//!
//! ## Example
//!
//! ```ignore
//! use reposcope_core::{AnalysisEngine, AnalysisRequest};
//!
//! let engine = AnalysisEngine::with_defaults()?;
//! let request = AnalysisRequest::new("supabase/supabase").with_token(token);
//! let report = engine.analyze_repository_comprehensive(&request)?;
//!
//! for (key, entries) in &report.enhanced_tech_stack {
//!     println!("{key}: {entries:?}");
//! }
//! ```

// Modules
pub mod budget;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod explorer;
pub mod gaps;
pub mod host;
pub mod repo_url;
pub mod report;
pub mod stack;
pub mod types;

// Re-exports for convenience
pub use budget::Deadline;
pub use config::{ExplorationConfig, GitHubSettings, GlobalConfig, OrchestrationConfig};
pub use engine::{AnalysisEngine, PipelineStage, Tool};
pub use errors::RepoScopeError;
pub use explorer::{explore, ExploreOptions};
pub use gaps::{EnhancedTechStack, GapCategoryAnalysis, StrategicRecommendation};
pub use host::{GitHubHost, LocalHost, MemoryHost, RemoteFile, RepositoryHost};
pub use repo_url::{parse_repository_url, RepositoryRef};
pub use report::{AnalysisReport, AnalysisRequest, ReportSummary, StackSummary};
pub use stack::{ConfigPresence, DependencyMap, StructuredTechStack};
pub use types::{
    AnalysisDepth, Category, ExplorationResult, FetchedFile, FileEntry, Priority, RepositoryInfo,
    TechnologyCategoryMap,
};
