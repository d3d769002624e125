use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the tables this service owns if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            id          UUID PRIMARY KEY,
            kind        TEXT NOT NULL CHECK (kind IN ('resume', 'job_description')),
            body        TEXT NOT NULL,
            created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create documents table")?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_documents_kind_created_at
        ON documents (kind, created_at DESC)
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create documents index")?;

    info!("Database schema ready");
    Ok(())
}
