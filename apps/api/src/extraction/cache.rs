use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::llm_client::MODEL;
use crate::models::document::DocumentKind;
use crate::models::skill::SkillExtractionResult;

const KEY_PREFIX: &str = "skillgap:extraction:v1";

/// Stores extraction snapshots keyed by document kind and text.
/// A miss or a failure only costs a fresh model call.
#[async_trait]
pub trait SnapshotCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<SkillExtractionResult>>;
    async fn put(&self, key: &str, snapshot: &SkillExtractionResult) -> Result<()>;
}

/// Deterministic key: the same text under the same model and the same
/// extractor scope (taxonomy fingerprint) always maps to the same entry.
pub fn cache_key(kind: DocumentKind, text: &str, scope: Uuid) -> String {
    let digest = Uuid::new_v5(
        &Uuid::NAMESPACE_OID,
        format!("{MODEL}\n{scope}\n{kind}\n{text}").as_bytes(),
    );
    format!("{KEY_PREFIX}:{kind}:{digest}")
}

pub struct RedisSnapshotCache {
    client: redis::Client,
    connection: OnceCell<MultiplexedConnection>,
    ttl: Duration,
}

impl RedisSnapshotCache {
    pub fn new(client: redis::Client, ttl: Duration) -> Self {
        Self {
            client,
            connection: OnceCell::new(),
            ttl,
        }
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        let conn = self
            .connection
            .get_or_try_init(|| self.client.get_multiplexed_async_connection())
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl SnapshotCache for RedisSnapshotCache {
    async fn get(&self, key: &str) -> Result<Option<SkillExtractionResult>> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, snapshot: &SkillExtractionResult) -> Result<()> {
        let mut conn = self.connection().await?;
        let json = serde_json::to_string(snapshot)?;
        redis::cmd("SET")
            .arg(key)
            .arg(json)
            .arg("EX")
            .arg(self.ttl.as_secs().max(1))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}
