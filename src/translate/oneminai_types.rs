//! Wire types for the 1minAI `/api/features` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CHAT_WITH_AI: &str = "CHAT_WITH_AI";

// ---------------------------------------------------------------------------
// Request types (what we send TO the provider)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPayload {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub model: String,
    pub prompt_object: PromptObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptObject {
    pub prompt: String,
    pub is_mixed: bool,
    pub web_search: bool,
}

impl ProviderPayload {
    pub fn chat(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            feature_type: CHAT_WITH_AI.to_string(),
            model: model.into(),
            prompt_object: PromptObject {
                prompt: prompt.into(),
                is_mixed: false,
                web_search: false,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Response types (what the provider sends back)
// ---------------------------------------------------------------------------

/// Only the path down to `resultObject` is modelled; every level is optional
/// so a sparse body deserializes instead of failing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesResponse {
    #[serde(default)]
    pub ai_record: Option<AiRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRecord {
    #[serde(default)]
    pub ai_record_detail: Option<AiRecordDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRecordDetail {
    #[serde(default)]
    pub result_object: Option<Value>,
}

impl FeaturesResponse {
    /// Read the result path out of an arbitrary JSON body. Anything that does
    /// not fit (wrong types at any level) is treated as absent.
    pub fn from_value(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }

    pub fn result_object(&self) -> Option<&Value> {
        self.ai_record
            .as_ref()?
            .ai_record_detail
            .as_ref()?
            .result_object
            .as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_wire_shape() {
        let payload = ProviderPayload::chat("gpt-4o", "User: hi");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "CHAT_WITH_AI",
                "model": "gpt-4o",
                "promptObject": {
                    "prompt": "User: hi",
                    "isMixed": false,
                    "webSearch": false
                }
            })
        );
    }

    #[test]
    fn test_result_object_path() {
        let body = json!({"aiRecord": {"aiRecordDetail": {"resultObject": ["Hi there"]}}});
        let resp = FeaturesResponse::from_value(&body);
        assert_eq!(resp.result_object(), Some(&json!(["Hi there"])));
    }

    #[test]
    fn test_missing_levels_are_absent() {
        assert!(FeaturesResponse::from_value(&json!({})).result_object().is_none());
        assert!(FeaturesResponse::from_value(&json!({"aiRecord": {}}))
            .result_object()
            .is_none());
        assert!(FeaturesResponse::from_value(&json!({"aiRecord": null}))
            .result_object()
            .is_none());
    }

    #[test]
    fn test_wrong_types_are_absent() {
        let body = json!({"aiRecord": "oops"});
        assert!(FeaturesResponse::from_value(&body).result_object().is_none());
        assert!(FeaturesResponse::from_value(&json!([1, 2])).result_object().is_none());
    }
}
