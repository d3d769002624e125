use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{DocumentKind, DocumentRow};

/// Longest text accepted for extraction; longer input is truncated.
pub const MAX_EXTRACTION_CHARS: usize = 30_000;
/// Longest text accepted for storage.
pub const MAX_STORED_CHARS: usize = 200_000;

/// Where the text for one side of a comparison comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentInput {
    Text(String),
    Stored(Uuid),
}

impl DocumentInput {
    /// Inline text wins over a stored id; blank text counts as absent.
    pub fn from_parts(text: Option<String>, id: Option<Uuid>) -> Option<Self> {
        match (text, id) {
            (Some(text), _) if !text.trim().is_empty() => Some(DocumentInput::Text(text)),
            (_, Some(id)) => Some(DocumentInput::Stored(id)),
            (Some(text), None) => Some(DocumentInput::Text(text)),
            (None, None) => None,
        }
    }
}

/// Plain-text documents registered ahead of analysis.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn fetch(&self, id: Uuid) -> Result<Option<DocumentRow>, AppError>;
    async fn insert(&self, kind: DocumentKind, body: &str) -> Result<DocumentRow, AppError>;
}

pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn fetch(&self, id: Uuid) -> Result<Option<DocumentRow>, AppError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, kind, body, created_at FROM documents WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, kind: DocumentKind, body: &str) -> Result<DocumentRow, AppError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (id, kind, body)
            VALUES ($1, $2, $3)
            RETURNING id, kind, body, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(kind.as_str())
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        info!("Stored {kind} document {} ({} chars)", row.id, body.chars().count());
        Ok(row)
    }
}

/// Trims the text, rejects empty input and truncates overly long input.
pub fn prepare_text(text: &str, kind: DocumentKind) -> Result<String, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!(
            "{} text must not be empty",
            kind.describe()
        )));
    }

    let length = trimmed.chars().count();
    if length > MAX_EXTRACTION_CHARS {
        warn!("{kind} text is {length} chars, truncating to {MAX_EXTRACTION_CHARS}");
        return Ok(trimmed.chars().take(MAX_EXTRACTION_CHARS).collect());
    }
    Ok(trimmed.to_string())
}

/// Resolves an input to extraction-ready text.
pub async fn resolve_text(
    documents: &dyn DocumentStore,
    input: DocumentInput,
    kind: DocumentKind,
) -> Result<String, AppError> {
    match input {
        DocumentInput::Text(text) => prepare_text(&text, kind),
        DocumentInput::Stored(id) => {
            let row = documents
                .fetch(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("document {id} not found")))?;
            let stored_kind = DocumentKind::parse(&row.kind);
            if stored_kind != Some(kind) {
                return Err(AppError::Validation(format!(
                    "document {id} is a {}, expected a {}",
                    stored_kind.map_or(row.kind.as_str(), |k| k.describe()),
                    kind.describe()
                )));
            }
            prepare_text(&row.body, kind)
        }
    }
}
