//! Axum route handlers for the Extraction API.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::report::AnalysisMode;
use crate::errors::AppError;
use crate::extraction::sources::{DocumentInput, MAX_STORED_CHARS};
use crate::models::document::DocumentKind;
use crate::models::skill::SkillExtractionResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StoreDocumentRequest {
    pub kind: DocumentKind,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct StoreDocumentResponse {
    pub document_id: Uuid,
    pub kind: DocumentKind,
    pub length: usize,
    pub created_at: DateTime<Utc>,
}

/// Each side is given either inline text or the id of a stored document.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractRequest {
    pub resume_text: Option<String>,
    pub resume_id: Option<Uuid>,
    pub job_description_text: Option<String>,
    #[serde(alias = "jd_id")]
    pub job_description_id: Option<Uuid>,
}

impl ExtractRequest {
    /// Splits the request into its two inputs; the resume is mandatory.
    pub fn into_inputs(self) -> Result<(DocumentInput, Option<DocumentInput>), AppError> {
        let resume = DocumentInput::from_parts(self.resume_text, self.resume_id).ok_or_else(|| {
            AppError::Validation("resume_text or resume_id is required".to_string())
        })?;
        let job_description =
            DocumentInput::from_parts(self.job_description_text, self.job_description_id);
        Ok((resume, job_description))
    }
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub resume_skills: SkillExtractionResult,
    pub jd_skills: Option<SkillExtractionResult>,
    pub mode: AnalysisMode,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents
///
/// Registers plain text so later requests can refer to it by id.
pub async fn handle_store_document(
    State(state): State<AppState>,
    Json(request): Json<StoreDocumentRequest>,
) -> Result<(StatusCode, Json<StoreDocumentResponse>), AppError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    let length = text.chars().count();
    if length > MAX_STORED_CHARS {
        return Err(AppError::Validation(format!(
            "text is {length} characters, the limit is {MAX_STORED_CHARS}"
        )));
    }

    let row = state.documents.insert(request.kind, text).await?;

    Ok((
        StatusCode::CREATED,
        Json(StoreDocumentResponse {
            document_id: row.id,
            kind: request.kind,
            length,
            created_at: row.created_at,
        }),
    ))
}

/// POST /api/v1/extract
///
/// Extracts both inventories without comparing them.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let (resume, job_description) = request.into_inputs()?;
    let pair = state.pipeline.extract_both(resume, job_description).await?;

    Ok(Json(ExtractResponse {
        mode: AnalysisMode::for_job_description(pair.jd_skills.is_some()),
        resume_skills: pair.resume_skills,
        jd_skills: pair.jd_skills,
    }))
}
