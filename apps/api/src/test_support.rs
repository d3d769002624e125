//! In-memory doubles for the trait seams, shared by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::cache::SnapshotCache;
use crate::extraction::sources::DocumentStore;
use crate::extraction::{ExtractionError, TextExtractor};
use crate::llm_client::{ChatModel, LlmError};
use crate::models::document::{DocumentKind, DocumentRow};
use crate::models::skill::SkillExtractionResult;

/// Replays queued model answers in order and records every prompt.
#[derive(Clone, Default)]
pub struct ScriptedModel {
    responses: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedModel {
    pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            prompts: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Extractor with a fixed outcome and delay per side.
pub struct FakeExtractor {
    resume: Result<SkillExtractionResult, ExtractionError>,
    job_description: Result<SkillExtractionResult, ExtractionError>,
    resume_delay: Duration,
    jd_delay: Duration,
    calls: AtomicUsize,
    texts: Mutex<Vec<String>>,
    completed: Mutex<Vec<DocumentKind>>,
    scope: Uuid,
}

impl FakeExtractor {
    pub fn new(
        resume: Result<SkillExtractionResult, ExtractionError>,
        job_description: Result<SkillExtractionResult, ExtractionError>,
    ) -> Self {
        Self {
            resume,
            job_description,
            resume_delay: Duration::ZERO,
            jd_delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
            completed: Mutex::new(Vec::new()),
            scope: Uuid::nil(),
        }
    }

    pub fn with_cache_scope(mut self, scope: Uuid) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_delays(mut self, resume: Duration, job_description: Duration) -> Self {
        self.resume_delay = resume;
        self.jd_delay = job_description;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }

    /// Sides whose extraction ran to a successful end.
    pub fn completed(&self) -> Vec<DocumentKind> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextExtractor for FakeExtractor {
    async fn extract(
        &self,
        text: &str,
        kind: DocumentKind,
    ) -> Result<SkillExtractionResult, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().unwrap().push(text.to_string());

        let (outcome, delay) = match kind {
            DocumentKind::Resume => (&self.resume, self.resume_delay),
            DocumentKind::JobDescription => (&self.job_description, self.jd_delay),
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if outcome.is_ok() {
            self.completed.lock().unwrap().push(kind);
        }
        outcome.clone()
    }

    fn cache_scope(&self) -> Uuid {
        self.scope
    }
}

#[derive(Default)]
pub struct InMemoryDocuments {
    rows: Mutex<HashMap<Uuid, DocumentRow>>,
}

#[async_trait]
impl DocumentStore for InMemoryDocuments {
    async fn fetch(&self, id: Uuid) -> Result<Option<DocumentRow>, AppError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, kind: DocumentKind, body: &str) -> Result<DocumentRow, AppError> {
        let row = DocumentRow {
            id: Uuid::new_v4(),
            kind: kind.as_str().to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().insert(row.id, row.clone());
        Ok(row)
    }
}

#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, SkillExtractionResult>>,
}

impl InMemoryCache {
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl SnapshotCache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<SkillExtractionResult>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &str, snapshot: &SkillExtractionResult) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), snapshot.clone());
        Ok(())
    }
}
