//! Turns 1minAI feature responses into OpenAI chat completions.

use chrono::Utc;
use serde_json::Value;

use super::oneminai_types::FeaturesResponse;
use super::openai_types::{ChatCompletionResponse, ChatUsage, Choice, ChoiceMessage};
use crate::error::ProxyError;

pub const NO_RESPONSE: &str = "No response generated";

/// Usage reported on synthetic responses, where nothing was counted.
pub const PLACEHOLDER_USAGE: (u64, u64) = (10, 20);

/// Translate a 1minAI features response into an `OpenAI` chat completion.
/// Pure apart from the clock: `requested_model` is echoed back as-is and
/// `prompt` is what was sent upstream, used only for the usage estimate.
pub fn oneminai_to_openai(
    body: &Value,
    requested_model: &str,
    prompt: &str,
) -> ChatCompletionResponse {
    let content = extract_content(body);
    let usage = ChatUsage::new(approximate_tokens(prompt), approximate_tokens(&content));

    completion(requested_model, content, usage)
}

/// First element of `aiRecord.aiRecordDetail.resultObject`, or [`NO_RESPONSE`].
pub fn extract_content(body: &Value) -> String {
    match FeaturesResponse::from_value(body).result_object() {
        Some(Value::Array(items)) if !items.is_empty() => value_to_text(&items[0]),
        _ => NO_RESPONSE.to_string(),
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whitespace-delimited word count. An estimate, not a tokenizer.
pub fn approximate_tokens(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// An in-shape completion describing a failure, so callers never have to
/// parse a bare error body from the completions endpoint.
pub fn synthetic_response(err: &ProxyError, requested_model: &str) -> ChatCompletionResponse {
    let content = if err.is_upstream() {
        format!(
            "1minAI API is currently unavailable (Error: {}). Please check the API configuration.",
            err.detail()
        )
    } else {
        format!("Error processing request: {}", err.detail())
    };

    let (prompt_tokens, completion_tokens) = PLACEHOLDER_USAGE;
    completion(
        requested_model,
        content,
        ChatUsage::new(prompt_tokens, completion_tokens),
    )
}

fn completion(model: &str, content: String, usage: ChatUsage) -> ChatCompletionResponse {
    let created = Utc::now().timestamp();

    ChatCompletionResponse {
        id: format!("chatcmpl-{created}"),
        object: "chat.completion".to_string(),
        created,
        model: model.to_string(),
        choices: vec![Choice {
            index: 0,
            message: ChoiceMessage {
                role: "assistant".to_string(),
                content,
            },
            finish_reason: Some("stop".to_string()),
        }],
        usage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_text_response() {
        let body = json!({"aiRecord": {"aiRecordDetail": {"resultObject": ["Hi there"]}}});
        let result = oneminai_to_openai(&body, "1minai-gpt-4o", "User: Hello friend");

        assert_eq!(result.object, "chat.completion");
        assert_eq!(result.model, "1minai-gpt-4o");
        assert_eq!(result.choices.len(), 1);
        assert_eq!(result.content(), Some("Hi there"));
        assert_eq!(result.choices[0].message.role, "assistant");
        assert_eq!(result.choices[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(result.usage, ChatUsage::new(3, 2));
        assert_eq!(result.usage.total_tokens, 5);
    }

    #[test]
    fn test_id_derived_from_created() {
        let result = oneminai_to_openai(&json!({}), "gpt-4o", "");
        assert_eq!(result.id, format!("chatcmpl-{}", result.created));
        assert!(result.created > 0);
    }

    #[test]
    fn test_empty_body_means_no_response() {
        let result = oneminai_to_openai(&json!({}), "gpt-4o", "User: hi");
        assert_eq!(result.content(), Some(NO_RESPONSE));
        assert_eq!(result.usage.completion_tokens, 3);
    }

    #[test]
    fn test_empty_or_non_list_result_object() {
        let empty = json!({"aiRecord": {"aiRecordDetail": {"resultObject": []}}});
        assert_eq!(extract_content(&empty), NO_RESPONSE);

        let string = json!({"aiRecord": {"aiRecordDetail": {"resultObject": "plain"}}});
        assert_eq!(extract_content(&string), NO_RESPONSE);
    }

    #[test]
    fn test_only_first_element_used() {
        let body = json!({"aiRecord": {"aiRecordDetail": {"resultObject": ["one", "two"]}}});
        assert_eq!(extract_content(&body), "one");
    }

    #[test]
    fn test_non_string_element_rendered_as_json() {
        let body = json!({"aiRecord": {"aiRecordDetail": {"resultObject": [{"text": "x"}]}}});
        assert_eq!(extract_content(&body), r#"{"text":"x"}"#);

        let body = json!({"aiRecord": {"aiRecordDetail": {"resultObject": [42]}}});
        assert_eq!(extract_content(&body), "42");
    }

    #[test]
    fn test_approximate_tokens_splits_on_any_whitespace() {
        assert_eq!(approximate_tokens(""), 0);
        assert_eq!(approximate_tokens("   "), 0);
        assert_eq!(approximate_tokens("System: be brief\n\nUser:  hi\tthere"), 6);
    }

    #[test]
    fn test_synthetic_upstream_response() {
        let err = ProxyError::upstream("Provider returned status 502");
        let result = synthetic_response(&err, "gpt-4o");

        assert_eq!(result.model, "gpt-4o");
        assert_eq!(result.choices.len(), 1);
        assert_eq!(
            result.content(),
            Some(
                "1minAI API is currently unavailable (Error: Provider returned status 502). \
                 Please check the API configuration."
            )
        );
        assert_eq!(result.usage, ChatUsage::new(10, 20));
        assert_eq!(result.usage.total_tokens, 30);
    }

    #[test]
    fn test_synthetic_internal_response() {
        let err = ProxyError::internal("bad state");
        let result = synthetic_response(&err, "gpt-4o");
        assert_eq!(result.content(), Some("Error processing request: bad state"));
        assert_eq!(result.usage.total_tokens, 30);
    }
}
