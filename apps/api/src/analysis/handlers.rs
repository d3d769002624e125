//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::report::SkillGapReport;
use crate::errors::AppError;
use crate::extraction::handlers::ExtractRequest;
use crate::models::skill::SkillExtractionResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_skills: SkillExtractionResult,
    #[serde(default)]
    pub jd_skills: Option<SkillExtractionResult>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub report: SkillGapReport,
}

#[derive(Debug, Serialize)]
pub struct SkillGapResponse {
    pub resume_skills: SkillExtractionResult,
    pub jd_skills: Option<SkillExtractionResult>,
    pub report: SkillGapReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Compares two previously extracted inventories. No model call.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let report = state
        .analyzer
        .analyze(&request.resume_skills, request.jd_skills.as_ref());

    Ok(Json(AnalyzeResponse { report }))
}

/// POST /api/v1/skill-gap
///
/// Full pipeline: resolve inputs → extract both sides concurrently → match →
/// score → recommend. Either extraction failing fails the request.
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<SkillGapResponse>, AppError> {
    let (resume, job_description) = request.into_inputs()?;
    let pair = state.pipeline.extract_both(resume, job_description).await?;

    let report = state
        .analyzer
        .analyze(&pair.resume_skills, pair.jd_skills.as_ref());

    Ok(Json(SkillGapResponse {
        resume_skills: pair.resume_skills,
        jd_skills: pair.jd_skills,
        report,
    }))
}
