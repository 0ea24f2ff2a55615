//! Prompt templates for the catalog assistant

use crate::types::{ChatMessage, ChatRole};

/// System prompt for the marketplace chat demo
pub const ASSISTANT_PROMPT: &str = r#"You are the assistant of an internal data marketplace.
You help people find data sources, the teams that own them, collections, insights and usage policies.

Guidelines:
- Answer concisely.
- Only state facts you were given. If you do not know, say so.
- When a question is about access or compliance, point to the relevant policy category."#;

/// Prepend the assistant prompt unless the caller already supplied a system message
pub fn with_assistant_prompt(messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    if messages.iter().any(|m| m.role == ChatRole::System) {
        return messages;
    }

    let mut out = Vec::with_capacity(messages.len() + 1);
    out.push(ChatMessage::system(ASSISTANT_PROMPT));
    out.extend(messages);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_prepended() {
        let messages = with_assistant_prompt(vec![ChatMessage::user("who owns orders?")]);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].content, "who owns orders?");
    }

    #[test]
    fn test_caller_system_prompt_kept() {
        let messages = with_assistant_prompt(vec![
            ChatMessage::system("answer in French"),
            ChatMessage::user("bonjour"),
        ]);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "answer in French");
    }
}
