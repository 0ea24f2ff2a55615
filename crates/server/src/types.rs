use datamarket_catalog::Suggestion;
use datamarket_llm::ChatMessage;
use datamarket_vector::SearchOutcome;
use serde::{Deserialize, Serialize};

/// Failure envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Single-entity envelope
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// List envelope
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,

    /// "Did you mean" matches when a search found nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<Suggestion>>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
            suggestions: None,
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = Some(suggestions);
        self
    }
}

/// Semantic search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Search query text
    pub query: String,

    /// Max results (server default when absent)
    pub limit: Option<usize>,

    /// Minimum similarity (server default when absent)
    pub threshold: Option<f32>,

    /// Restrict to these content types
    pub content_types: Option<Vec<String>>,
}

/// Semantic search response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,

    #[serde(flatten)]
    pub outcome: SearchOutcome,
}

/// Chat demo request
#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub messages: Vec<ChatMessage>,

    /// Override the configured chat model
    pub model: Option<String>,
}

/// Chat demo response
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub success: bool,
    pub reply: String,
    pub model: String,
}

/// Health probe
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub embedding_model: String,
    pub chat_model: String,
}
