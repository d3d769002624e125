mod analysis;
mod config;
mod db;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod routes;
mod state;
mod taxonomy;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::report::SkillGapAnalyzer;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::extraction::cache::{RedisSnapshotCache, SnapshotCache};
use crate::extraction::extractor::LlmSkillExtractor;
use crate::extraction::orchestrator::ExtractionPipeline;
use crate::extraction::sources::{DocumentStore, PgDocumentStore};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::taxonomy::SkillTaxonomy;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillGap API v{}", env!("CARGO_PKG_VERSION"));

    // Load the skill taxonomy (read-only for the life of the process)
    let taxonomy = match &config.taxonomy_path {
        Some(path) => SkillTaxonomy::from_json_file(path)
            .with_context(|| format!("Failed to load taxonomy from {}", path.display()))?,
        None => SkillTaxonomy::builtin().context("Built-in taxonomy is inconsistent")?,
    };
    info!(
        "Skill taxonomy loaded: {} skills, {} aliases (fingerprint {})",
        taxonomy.len(),
        taxonomy.alias_count(),
        taxonomy.fingerprint()
    );
    let taxonomy = Arc::new(taxonomy);

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;
    let documents: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(db));

    // Initialize Redis snapshot cache (optional)
    let cache: Option<Arc<dyn SnapshotCache>> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str()).context("Invalid REDIS_URL")?;
            info!("Redis snapshot cache enabled (ttl {}s)", config.cache_ttl.as_secs());
            let cache: Arc<dyn SnapshotCache> =
                Arc::new(RedisSnapshotCache::new(client, config.cache_ttl));
            Some(cache)
        }
        None => {
            info!("REDIS_URL not set, extraction cache disabled");
            None
        }
    };

    // Initialize LLM client and extractor
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout)?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        llm.timeout().as_secs()
    );
    let extractor = Arc::new(LlmSkillExtractor::new(llm, taxonomy.clone()));

    // Build app state
    let state = AppState {
        pipeline: ExtractionPipeline::new(extractor, documents.clone(), cache),
        documents,
        analyzer: Arc::new(SkillGapAnalyzer::new(taxonomy, config.analysis)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
