use async_trait::async_trait;
use datamarket_common::Result;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::types::EmbeddingRecord;

/// Bulk source of stored embeddings
///
/// Implementations return every matching row in one call, without pagination.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn fetch_embeddings(&self, content_types: Option<&[String]>) -> Result<Vec<EmbeddingRecord>>;
}

fn type_allowed(record: &EmbeddingRecord, content_types: Option<&[String]>) -> bool {
    match content_types {
        Some(types) if !types.is_empty() => types.iter().any(|t| *t == record.content_type),
        _ => true,
    }
}

/// Embeddings table kept as a JSON array on disk
///
/// The file is re-read on every fetch so rows written by the ingestion job
/// show up without a restart. A missing file is an empty table.
pub struct JsonEmbeddingStore {
    path: PathBuf,
}

impl JsonEmbeddingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CandidateStore for JsonEmbeddingStore {
    async fn fetch_embeddings(&self, content_types: Option<&[String]>) -> Result<Vec<EmbeddingRecord>> {
        if !tokio::fs::try_exists(&self.path).await? {
            debug!("Embeddings file {} does not exist yet", self.path.display());
            return Ok(Vec::new());
        }

        let data = tokio::fs::read_to_string(&self.path).await?;
        let rows: Vec<Value> = serde_json::from_str(&data)?;
        let total = rows.len();

        let records: Vec<EmbeddingRecord> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(i, row)| match serde_json::from_value::<EmbeddingRecord>(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping unreadable embedding row #{}: {}", i, e);
                    None
                }
            })
            .filter(|r| type_allowed(r, content_types))
            .collect();

        debug!("Fetched {} of {} embedding rows", records.len(), total);
        Ok(records)
    }
}

/// Fixed in-memory table
#[derive(Default)]
pub struct MemoryEmbeddingStore {
    records: Vec<EmbeddingRecord>,
}

impl MemoryEmbeddingStore {
    pub fn new(records: Vec<EmbeddingRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl CandidateStore for MemoryEmbeddingStore {
    async fn fetch_embeddings(&self, content_types: Option<&[String]>) -> Result<Vec<EmbeddingRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| type_allowed(r, content_types))
            .cloned()
            .collect())
    }
}
