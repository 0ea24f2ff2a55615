//! Datamarket model provider integration
//!
//! OpenAI-compatible client for embeddings and chat completions

mod client;
mod llm_trait;
mod prompts;
mod types;

pub use client::OpenAiClient;
pub use llm_trait::LlmClient;
pub use prompts::{with_assistant_prompt, ASSISTANT_PROMPT};
pub use types::{
    ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatRole, EmbedData, EmbedRequest,
    EmbedResponse,
};
