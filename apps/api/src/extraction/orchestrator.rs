use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::extraction::cache::{cache_key, SnapshotCache};
use crate::extraction::sources::{resolve_text, DocumentInput, DocumentStore};
use crate::extraction::{SideError, TextExtractor};
use crate::models::document::DocumentKind;
use crate::models::skill::SkillExtractionResult;

/// Both inventories of one comparison. `jd_skills` is `None` when no job
/// description was supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPair {
    pub resume_skills: SkillExtractionResult,
    pub jd_skills: Option<SkillExtractionResult>,
}

/// Resolves inputs, consults the snapshot cache and runs both extractions
/// concurrently. The result is all-or-nothing: if either side fails the
/// other is cancelled and the failure is reported with its side.
#[derive(Clone)]
pub struct ExtractionPipeline {
    extractor: Arc<dyn TextExtractor>,
    documents: Arc<dyn DocumentStore>,
    cache: Option<Arc<dyn SnapshotCache>>,
}

impl ExtractionPipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        documents: Arc<dyn DocumentStore>,
        cache: Option<Arc<dyn SnapshotCache>>,
    ) -> Self {
        Self {
            extractor,
            documents,
            cache,
        }
    }

    pub async fn extract_both(
        &self,
        resume: DocumentInput,
        job_description: Option<DocumentInput>,
    ) -> Result<ExtractedPair, AppError> {
        let resume_text = resolve_text(self.documents.as_ref(), resume, DocumentKind::Resume).await?;
        let jd_text = match job_description {
            Some(input) => Some(
                resolve_text(self.documents.as_ref(), input, DocumentKind::JobDescription).await?,
            ),
            None => None,
        };

        match jd_text {
            Some(jd_text) => {
                let (resume_skills, jd_skills) = tokio::try_join!(
                    self.extract_one(&resume_text, DocumentKind::Resume),
                    self.extract_one(&jd_text, DocumentKind::JobDescription),
                )?;
                Ok(ExtractedPair {
                    resume_skills,
                    jd_skills: Some(jd_skills),
                })
            }
            None => {
                info!("No job description supplied, extracting resume only");
                let resume_skills = self
                    .extract_one(&resume_text, DocumentKind::Resume)
                    .await?;
                Ok(ExtractedPair {
                    resume_skills,
                    jd_skills: None,
                })
            }
        }
    }

    async fn extract_one(
        &self,
        text: &str,
        kind: DocumentKind,
    ) -> Result<SkillExtractionResult, SideError> {
        let key = cache_key(kind, text, self.extractor.cache_scope());

        if let Some(cache) = &self.cache {
            match cache.get(&key).await {
                Ok(Some(snapshot)) => {
                    debug!("{kind} extraction served from cache");
                    return Ok(snapshot);
                }
                Ok(None) => {}
                Err(e) => warn!("Snapshot cache read failed for {kind}: {e}"),
            }
        }

        let snapshot = self
            .extractor
            .extract(text, kind)
            .await
            .map_err(|e| e.on_side(kind))?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(&key, &snapshot).await {
                warn!("Snapshot cache write failed for {kind}: {e}");
            }
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;
    use crate::extraction::ExtractionError;
    use crate::models::skill::{Skill, SkillCategory};
    use crate::test_support::{FakeExtractor, InMemoryCache, InMemoryDocuments};

    fn snapshot(names: &[&str]) -> SkillExtractionResult {
        SkillExtractionResult {
            skills: names
                .iter()
                .map(|n| Skill::new(*n, SkillCategory::Other))
                .collect(),
            ..Default::default()
        }
    }

    fn pipeline(extractor: Arc<FakeExtractor>) -> ExtractionPipeline {
        ExtractionPipeline::new(extractor, Arc::new(InMemoryDocuments::default()), None)
    }

    fn text(value: &str) -> DocumentInput {
        DocumentInput::Text(value.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_sides_run_concurrently() {
        let extractor = Arc::new(
            FakeExtractor::new(Ok(snapshot(&["Rust"])), Ok(snapshot(&["Go"])))
                .with_delays(Duration::from_secs(5), Duration::from_secs(5)),
        );
        let started = Instant::now();

        let pair = pipeline(extractor.clone())
            .extract_both(text("resume"), Some(text("jd")))
            .await
            .unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(5));
        assert!(elapsed < Duration::from_secs(6), "took {elapsed:?}");
        assert_eq!(pair.resume_skills.skills[0].name, "Rust");
        assert_eq!(pair.jd_skills.unwrap().skills[0].name, "Go");
        assert_eq!(extractor.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_jd_timeout_fails_whole_request_and_cancels_resume() {
        let extractor = Arc::new(
            FakeExtractor::new(
                Ok(snapshot(&["Rust"])),
                Err(ExtractionError::Timeout(Duration::from_secs(45))),
            )
            .with_delays(Duration::from_secs(30), Duration::from_secs(1)),
        );

        let err = pipeline(extractor.clone())
            .extract_both(text("resume"), Some(text("jd")))
            .await
            .unwrap_err();

        match err {
            AppError::Extraction(side_error) => {
                assert_eq!(side_error.side, DocumentKind::JobDescription);
                assert!(matches!(side_error.source, ExtractionError::Timeout(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(extractor.completed().is_empty(), "resume side should be cancelled");
    }

    #[tokio::test]
    async fn test_resume_failure_is_tagged_resume() {
        let extractor = Arc::new(FakeExtractor::new(
            Err(ExtractionError::Upstream("503".into())),
            Ok(snapshot(&["Go"])),
        ));

        let err = pipeline(extractor)
            .extract_both(text("resume"), Some(text("jd")))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Extraction(e) if e.side == DocumentKind::Resume));
    }

    #[tokio::test]
    async fn test_missing_jd_extracts_resume_only() {
        let extractor = Arc::new(FakeExtractor::new(
            Ok(snapshot(&["Rust"])),
            Ok(snapshot(&["unused"])),
        ));

        let pair = pipeline(extractor.clone())
            .extract_both(text("resume"), None)
            .await
            .unwrap();

        assert!(pair.jd_skills.is_none());
        assert_eq!(extractor.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_text_rejected_before_any_model_call() {
        let extractor = Arc::new(FakeExtractor::new(
            Ok(snapshot(&["Rust"])),
            Ok(snapshot(&["Go"])),
        ));

        let err = pipeline(extractor.clone())
            .extract_both(text("resume"), Some(text("   ")))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(extractor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_stored_documents_are_resolved() {
        let documents = Arc::new(InMemoryDocuments::default());
        let resume = documents
            .insert(DocumentKind::Resume, "Rust engineer")
            .await
            .unwrap();
        let extractor = Arc::new(FakeExtractor::new(
            Ok(snapshot(&["Rust"])),
            Ok(snapshot(&["Go"])),
        ));
        let pipeline = ExtractionPipeline::new(extractor.clone(), documents, None);

        pipeline
            .extract_both(DocumentInput::Stored(resume.id), Some(text("jd")))
            .await
            .unwrap();

        assert_eq!(
            extractor.texts(),
            vec!["Rust engineer".to_string(), "jd".to_string()]
        );
    }

    #[tokio::test]
    async fn test_cache_hit_skips_extractor() {
        let extractor = Arc::new(FakeExtractor::new(
            Ok(snapshot(&["Rust"])),
            Ok(snapshot(&["Go"])),
        ));
        let cache = Arc::new(InMemoryCache::default());
        let shared: Arc<dyn SnapshotCache> = cache.clone();
        let pipeline = ExtractionPipeline::new(
            extractor.clone(),
            Arc::new(InMemoryDocuments::default()),
            Some(shared),
        );

        let first = pipeline
            .extract_both(text("resume"), Some(text("jd")))
            .await
            .unwrap();
        let second = pipeline
            .extract_both(text("resume"), Some(text("jd")))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(extractor.call_count(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_cached_snapshot_not_reused_across_taxonomies() {
        let cache = Arc::new(InMemoryCache::default());
        let shared: Arc<dyn SnapshotCache> = cache.clone();
        let before = Arc::new(
            FakeExtractor::new(Ok(snapshot(&["Rust"])), Ok(snapshot(&["Go"])))
                .with_cache_scope(uuid::Uuid::from_u128(1)),
        );
        let after = Arc::new(
            FakeExtractor::new(Ok(snapshot(&["Rust", "Axum"])), Ok(snapshot(&["Go"])))
                .with_cache_scope(uuid::Uuid::from_u128(2)),
        );
        let documents = Arc::new(InMemoryDocuments::default());

        ExtractionPipeline::new(before, documents.clone(), Some(shared.clone()))
            .extract_both(text("resume"), None)
            .await
            .unwrap();
        let rerun = ExtractionPipeline::new(after.clone(), documents, Some(shared))
            .extract_both(text("resume"), None)
            .await
            .unwrap();

        assert_eq!(after.call_count(), 1);
        assert_eq!(rerun.resume_skills, snapshot(&["Rust", "Axum"]));
        assert_eq!(cache.len(), 2);
    }
}
