use async_trait::async_trait;
use datamarket_common::{AppConfig, MarketError, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::llm_trait::LlmClient;
use crate::types::{ChatRequest, ChatResponse, EmbedRequest, EmbedResponse};

/// Client for OpenAI-compatible chat and embedding APIs
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
    max_retries: u32,
}

impl OpenAiClient {
    /// Create new client
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MarketError::config(format!("Failed to create HTTP client: {}", e)))?;

        if api_key.is_none() {
            warn!("No provider API key configured, requests will be sent unauthenticated");
        }

        info!("Model provider client initialized: {}", base_url);
        Ok(Self {
            base_url,
            api_key,
            client,
            max_retries: max_retries.max(1),
        })
    }

    /// Create client from application config
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.provider_base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
            config.max_retries,
        )
    }

    /// POST a JSON body, retrying transient failures with exponential backoff
    async fn post_with_retry<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.try_post(&url, body).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = backoff_delay(attempt);
                    warn!(
                        "Provider request to {} failed (attempt {}/{}): {}. Retrying in {:?}...",
                        path, attempt, self.max_retries, e, delay
                    );
                    last_error = Some(e);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| MarketError::provider_unavailable("All retries failed")))
    }

    /// Single attempt
    async fn try_post<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .authorize(self.client.post(url))
            .json(body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &detail));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| MarketError::llm(format!("Failed to parse provider response: {}", e)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat(&self, request: ChatRequest) -> Result<String> {
        debug!(
            "Sending chat request - Model: {}, Messages: {}",
            request.model,
            request.messages.len()
        );

        let response: ChatResponse = self.post_with_retry("chat/completions", &request).await?;
        let reply = first_reply(response)?;

        debug!("Received chat reply - Length: {}", reply.len());
        Ok(reply)
    }

    async fn embed(&self, model: &str, text: &str) -> Result<Vec<f32>> {
        debug!("Generating embedding - Model: {}, Text length: {}", model, text.len());

        let request = EmbedRequest {
            model: model.to_string(),
            input: text.to_string(),
        };

        let response: EmbedResponse = self.post_with_retry("embeddings", &request).await?;
        let embedding = first_embedding(response)?;

        debug!("Received embedding - Dimension: {}", embedding.len());
        Ok(embedding)
    }
}

/// 1s, 2s, 4s, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(2u64.pow(attempt.saturating_sub(1).min(5)))
}

fn classify_transport_error(e: reqwest::Error) -> MarketError {
    if e.is_timeout() || e.is_connect() {
        MarketError::provider_unavailable(format!("Provider request failed: {}", e))
    } else {
        MarketError::llm(format!("Provider request failed: {}", e))
    }
}

/// Rate limits and upstream outages are worth retrying; other 4xx are not
fn classify_status(status: StatusCode, detail: &str) -> MarketError {
    let message = format!("Provider returned {}: {}", status, detail.trim());
    if status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
    {
        MarketError::provider_unavailable(message)
    } else {
        MarketError::llm(message)
    }
}

fn first_embedding(response: EmbedResponse) -> Result<Vec<f32>> {
    let embedding = response
        .data
        .into_iter()
        .min_by_key(|d| d.index)
        .map(|d| d.embedding)
        .ok_or_else(|| MarketError::llm("Embedding response contained no data"))?;

    if embedding.is_empty() {
        return Err(MarketError::llm("Empty embedding from provider"));
    }

    Ok(embedding)
}

fn first_reply(response: ChatResponse) -> Result<String> {
    let reply = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| MarketError::llm("Chat response contained no choices"))?;

    if reply.trim().is_empty() {
        return Err(MarketError::llm("Empty reply from provider"));
    }

    Ok(reply)
}
