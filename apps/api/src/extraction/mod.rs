// Extraction: turns resume / job description text into typed skill inventories.
// All model calls go through llm_client via the ChatModel trait.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::llm_client::LlmError;
use crate::models::document::DocumentKind;
use crate::models::skill::SkillExtractionResult;

pub mod cache;
pub mod extractor;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod repair;
pub mod sources;

/// Terminal failure of a single extraction call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("the model did not answer within {0:?}")]
    Timeout(Duration),

    #[error("the model returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("the model provider failed: {0}")]
    Upstream(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionErrorKind {
    Timeout,
    MalformedResponse,
    UpstreamError,
}

impl ExtractionError {
    pub fn kind(&self) -> ExtractionErrorKind {
        match self {
            ExtractionError::Timeout(_) => ExtractionErrorKind::Timeout,
            ExtractionError::MalformedResponse(_) => ExtractionErrorKind::MalformedResponse,
            ExtractionError::Upstream(_) => ExtractionErrorKind::UpstreamError,
        }
    }

    pub fn on_side(self, side: DocumentKind) -> SideError {
        SideError {
            side,
            source: self,
        }
    }
}

impl From<LlmError> for ExtractionError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout(after) => ExtractionError::Timeout(after),
            LlmError::Http(e) => ExtractionError::Upstream(e.to_string()),
            LlmError::Api { status, message } => {
                ExtractionError::Upstream(format!("status {status}: {message}"))
            }
            LlmError::EmptyContent => {
                ExtractionError::MalformedResponse("model returned no text".to_string())
            }
        }
    }
}

/// An extraction failure annotated with the document it happened on.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} extraction failed: {source}", .side.describe())]
pub struct SideError {
    pub side: DocumentKind,
    #[source]
    pub source: ExtractionError,
}

/// Capability interface for "text in, skill inventory out".
///
/// Production uses `LlmSkillExtractor`; tests substitute a fake so the
/// orchestration can be exercised without a network.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(
        &self,
        text: &str,
        kind: DocumentKind,
    ) -> Result<SkillExtractionResult, ExtractionError>;

    /// Identifies the reference data that shapes `extract` output. Cached
    /// snapshots are only reused under the same scope.
    fn cache_scope(&self) -> Uuid;
}
