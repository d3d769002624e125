use std::sync::Arc;

use crate::analysis::report::SkillGapAnalyzer;
use crate::extraction::orchestrator::ExtractionPipeline;
use crate::extraction::sources::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Input resolution, snapshot cache and concurrent extraction.
    pub pipeline: ExtractionPipeline,
    pub documents: Arc<dyn DocumentStore>,
    /// Pure matching / scoring / recommendation; shares the read-only taxonomy.
    pub analyzer: Arc<SkillGapAnalyzer>,
}
