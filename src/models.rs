//! The model catalogue served from `/v1/models`.
//!
//! 1minAI has no listing endpoint we can rely on, so the catalogue is static.
//! Entries carry the timestamp the process started with, which keeps repeated
//! listings identical.

use crate::config::ProxyConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub const OWNER: &str = "1minai";

/// Model listed when the full catalogue is unavailable.
pub const FALLBACK_MODEL: &str = "gpt-4o-mini";

const SUPPORTED_MODELS: &[&str] = &[
    "gemini-2.0-flash-lite",
    "gemini-2.0-flash",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "gpt-4o-mini",
    "gpt-4o",
    "claude-3-5-sonnet",
    "claude-3-haiku",
];

/// An OpenAI-compatible model object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

/// The body of `GET /v1/models`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<Model>,
}

impl Model {
    fn new(id: &str, created: i64) -> Self {
        Self {
            id: id.to_string(),
            object: "model".to_string(),
            created,
            owned_by: OWNER.to_string(),
        }
    }
}

impl ModelList {
    fn new(data: Vec<Model>) -> Self {
        Self {
            object: "list".to_string(),
            data,
        }
    }

    /// Single-entry list served when the catalogue cannot be produced.
    #[must_use]
    pub fn fallback(created: i64) -> Self {
        Self::new(vec![Model::new(FALLBACK_MODEL, created)])
    }

    pub fn ids(&self) -> Vec<&str> {
        self.data.iter().map(|m| m.id.as_str()).collect()
    }
}

#[must_use]
pub fn supported_models() -> &'static [&'static str] {
    SUPPORTED_MODELS
}

/// The provider's model catalogue.
///
/// # Errors
/// Returns `ProxyError::Config` when no credential is configured, since none
/// of the listed models would be usable.
pub fn provider_models(config: &ProxyConfig, created: i64) -> Result<ModelList> {
    config.require_api_key()?;
    Ok(ModelList::new(
        SUPPORTED_MODELS
            .iter()
            .map(|id| Model::new(id, created))
            .collect(),
    ))
}

/// The catalogue, degraded to [`ModelList::fallback`] on any failure.
#[must_use]
pub fn list_models(config: &ProxyConfig, created: i64) -> ModelList {
    match provider_models(config, created) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "Model catalogue unavailable, using fallback");
            ModelList::fallback(created)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::ModelAlias;

    fn configured() -> ProxyConfig {
        ProxyConfig {
            api_key: Some("test-key".to_string()),
            ..ProxyConfig::default()
        }
    }

    #[test]
    fn test_full_catalogue() {
        let list = list_models(&configured(), 1_700_000_000);

        assert_eq!(list.object, "list");
        assert_eq!(list.data.len(), 8);
        assert_eq!(list.ids()[0], "gemini-2.0-flash-lite");
        assert!(list.data.iter().all(|m| m.object == "model"));
        assert!(list.data.iter().all(|m| m.owned_by == OWNER));
        assert!(list.data.iter().all(|m| m.created == 1_700_000_000));
    }

    #[test]
    fn test_missing_key_falls_back() {
        let list = list_models(&ProxyConfig::default(), 5);
        assert_eq!(list, ModelList::fallback(5));
        assert_eq!(list.ids(), vec![FALLBACK_MODEL]);
    }

    #[test]
    fn test_listing_is_stable() {
        let config = configured();
        assert_eq!(list_models(&config, 42), list_models(&config, 42));
    }

    #[test]
    fn test_every_listed_model_resolves_to_itself() {
        for id in supported_models() {
            let alias = ModelAlias::from_name(id).unwrap();
            assert_eq!(alias.provider_model, *id);
        }
    }
}
