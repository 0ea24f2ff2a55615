use actix_web::{post, web, HttpResponse};
use datamarket_common::MarketError;
use datamarket_llm::{with_assistant_prompt, ChatMessage, ChatRequest, ChatRole};
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{ChatBody, ChatReply};

fn validate_messages(messages: &[ChatMessage]) -> Result<(), MarketError> {
    let last = messages
        .last()
        .ok_or_else(|| MarketError::invalid_input("messages must not be empty"))?;

    if last.role != ChatRole::User {
        return Err(MarketError::invalid_input(
            "the last message must come from the user",
        ));
    }
    if last.content.trim().is_empty() {
        return Err(MarketError::invalid_input("the last message must not be empty"));
    }

    Ok(())
}

/// Catalog assistant chat
#[post("/chat")]
pub async fn chat(
    req: web::Json<ChatBody>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let body = req.into_inner();
    validate_messages(&body.messages)?;

    let model = body
        .model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| state.config.chat_model.clone());

    info!("Chat request: {} messages, model {}", body.messages.len(), model);

    let reply = state
        .llm_client
        .chat(ChatRequest {
            model: model.clone(),
            messages: with_assistant_prompt(body.messages),
            temperature: Some(0.3),
            max_tokens: None,
        })
        .await?;

    Ok(HttpResponse::Ok().json(ChatReply {
        success: true,
        reply,
        model,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_messages() {
        assert!(validate_messages(&[]).is_err());
        assert!(validate_messages(&[ChatMessage::assistant("hi")]).is_err());
        assert!(validate_messages(&[ChatMessage::user("   ")]).is_err());
        assert!(validate_messages(&[
            ChatMessage::user("hello"),
            ChatMessage::assistant("hi"),
            ChatMessage::user("who owns orders?"),
        ])
        .is_ok());
    }
}
