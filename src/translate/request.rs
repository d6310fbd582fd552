//! Translate `OpenAI` Chat Completions requests into 1minAI feature payloads.
//!
//! 1minAI takes one prompt string rather than a message list, so the
//! conversation is flattened into labelled paragraphs. Sampling parameters
//! (`temperature`, `max_tokens`) have no counterpart in the payload and are
//! dropped.

use super::oneminai_types::ProviderPayload;
use super::openai_types::{ChatCompletionRequest, ChatMessage};
use crate::aliases::resolve_provider_model;
use crate::error::{ProxyError, Result};

/// Translate a chat completion request into the provider payload.
/// Pure function; the only failure is an empty message list.
pub fn openai_to_oneminai(req: &ChatCompletionRequest) -> Result<ProviderPayload> {
    if req.messages.is_empty() {
        return Err(ProxyError::invalid_request("messages must not be empty"));
    }

    let prompt = build_prompt(&req.messages);
    let model = resolve_provider_model(&req.model);

    Ok(ProviderPayload::chat(model, prompt))
}

/// Render messages as `"<Label>: <content>"` paragraphs separated by a blank line.
pub fn build_prompt(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", role_label(&m.role), m.text()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Unrecognised roles are spoken as the user.
pub fn role_label(role: &str) -> &'static str {
    match role {
        "system" => "System",
        "assistant" => "Assistant",
        _ => "User",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::DEFAULT_PROVIDER_MODEL;

    fn request(model: &str, messages: Vec<ChatMessage>) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: model.to_string(),
            messages,
            temperature: None,
            max_tokens: None,
            stream: None,
        }
    }

    #[test]
    fn test_simple_conversation() {
        let req = request(
            "gpt-4o",
            vec![
                ChatMessage::new("system", "You are helpful"),
                ChatMessage::new("user", "Hello"),
                ChatMessage::new("assistant", "Hi!"),
                ChatMessage::new("user", "How are you?"),
            ],
        );

        let payload = openai_to_oneminai(&req).unwrap();

        assert_eq!(payload.model, "gpt-4o");
        assert_eq!(payload.feature_type, "CHAT_WITH_AI");
        assert_eq!(
            payload.prompt_object.prompt,
            "System: You are helpful\n\nUser: Hello\n\nAssistant: Hi!\n\nUser: How are you?"
        );
        assert!(!payload.prompt_object.is_mixed);
        assert!(!payload.prompt_object.web_search);
    }

    #[test]
    fn test_one_paragraph_per_message_in_order() {
        let messages: Vec<ChatMessage> = (0..7)
            .map(|i| {
                let role = ["system", "user", "assistant", "tool"][i % 4];
                ChatMessage::new(role, format!("message {i}"))
            })
            .collect();

        let prompt = build_prompt(&messages);
        let paragraphs: Vec<&str> = prompt.split("\n\n").collect();

        assert_eq!(paragraphs.len(), messages.len());
        assert_eq!(paragraphs[0], "System: message 0");
        assert_eq!(paragraphs[1], "User: message 1");
        assert_eq!(paragraphs[2], "Assistant: message 2");
        assert_eq!(paragraphs[3], "User: message 3");
        assert_eq!(paragraphs[6], "Assistant: message 6");
    }

    #[test]
    fn test_unknown_roles_are_user() {
        assert_eq!(role_label("user"), "User");
        assert_eq!(role_label("tool"), "User");
        assert_eq!(role_label("function"), "User");
        assert_eq!(role_label("System"), "User");
    }

    #[test]
    fn test_unknown_model_uses_default() {
        let req = request("unknown-model-xyz", vec![ChatMessage::new("user", "hi")]);
        let payload = openai_to_oneminai(&req).unwrap();
        assert_eq!(payload.model, DEFAULT_PROVIDER_MODEL);
    }

    #[test]
    fn test_empty_messages_rejected() {
        let req = request("gpt-4o", Vec::new());
        let err = openai_to_oneminai(&req).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidRequest { .. }));
    }

    #[test]
    fn test_sampling_params_not_forwarded() {
        let mut req = request("gpt-4o", vec![ChatMessage::new("user", "hi")]);
        req.temperature = Some(0.2);
        req.max_tokens = Some(64);
        req.stream = Some(true);

        let payload = openai_to_oneminai(&req).unwrap();
        let json = serde_json::to_string(&payload).unwrap();

        assert!(!json.contains("temperature"));
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("stream"));
    }
}
