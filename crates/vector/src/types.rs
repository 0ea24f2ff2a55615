use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Stored embedding row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// Row ID
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Kind of source entity ("data_source", "insight", ...)
    pub content_type: String,

    /// Entity ID within `content_type`
    #[serde(deserialize_with = "string_or_number")]
    pub content_id: String,

    /// Text that was embedded
    #[serde(default)]
    pub content_text: String,

    /// Passed through to results unchanged
    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// Raw stored vector, validated at search time
    #[serde(default)]
    pub embedding: Value,
}

/// Search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub content_type: String,
    pub content_id: String,
    pub content_text: String,
    pub metadata: Map<String, Value>,

    /// Cosine similarity (-1.0 to 1.0)
    pub similarity: f32,
}

impl SearchResult {
    pub fn new(record: EmbeddingRecord, similarity: f32) -> Self {
        Self {
            id: record.id,
            content_type: record.content_type,
            content_id: record.content_id,
            content_text: record.content_text,
            metadata: record.metadata,
            similarity,
        }
    }
}

/// Ranked search output
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<SearchResult>,
    pub total_found: usize,

    /// Set when `results` is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchOutcome {
    pub fn found(results: Vec<SearchResult>) -> Self {
        Self {
            total_found: results.len(),
            results,
            message: None,
        }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            total_found: 0,
            message: Some(message.into()),
        }
    }
}

/// Search knobs
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Maximum results returned
    pub limit: usize,

    /// Minimum similarity kept
    pub threshold: f32,

    /// Restrict candidates to these content types; `None` or empty means all
    pub content_types: Option<Vec<String>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            threshold: 0.7,
            content_types: None,
        }
    }
}

/// Embedding table statistics
#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    pub total_embeddings: usize,
    pub by_content_type: BTreeMap<String, usize>,
    pub embedding_model: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
