use async_trait::async_trait;
use datamarket_common::Result;

use crate::types::ChatRequest;

/// Common trait for hosted model clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Run a chat completion and return the assistant reply
    async fn chat(&self, request: ChatRequest) -> Result<String>;

    /// Generate embedding for text
    async fn embed(&self, model: &str, text: &str) -> Result<Vec<f32>>;
}
