pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::extraction::handlers as extraction;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction API
        .route("/api/v1/documents", post(extraction::handle_store_document))
        .route("/api/v1/extract", post(extraction::handle_extract))
        // Analysis API
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        .route("/api/v1/skill-gap", post(analysis::handle_skill_gap))
        .with_state(state)
}
