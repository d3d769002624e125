use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::{ExtractionError, SideError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Extraction(#[from] SideError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Extraction(e) => match e.source {
                ExtractionError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                ExtractionError::MalformedResponse(_) | ExtractionError::Upstream(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether resubmitting the same request may succeed.
    pub fn retryable(&self) -> bool {
        matches!(self, AppError::Extraction(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let retryable = self.retryable();

        let (code, message, side) = match &self {
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone(), None),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone(), None),
            AppError::Extraction(e) => {
                tracing::error!(side = %e.side, kind = ?e.source.kind(), "Extraction error: {e}");
                let doc = e.side.describe();
                let (code, message) = match &e.source {
                    ExtractionError::Timeout(_) => (
                        "EXTRACTION_TIMEOUT",
                        format!("Reading the {doc} took too long. Please try again in a moment."),
                    ),
                    ExtractionError::MalformedResponse(_) => (
                        "EXTRACTION_MALFORMED",
                        format!(
                            "The {doc} could not be analyzed this time. Please try again; \
                             if it keeps failing, check that the text is a readable {doc}."
                        ),
                    ),
                    ExtractionError::Upstream(_) => (
                        "UPSTREAM_ERROR",
                        format!("The analysis service is unavailable while reading the {doc}. Please try again shortly."),
                    ),
                };
                (code, message, Some(e.side))
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message,
            "retryable": retryable,
        });
        if let Some(side) = side {
            error["side"] = json!(side);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
