//! Static client-to-provider model alias table.
//!
//! Clients may ask for a model either by its plain provider name or by a
//! `1minai-` prefixed alias. Anything not listed resolves to
//! [`DEFAULT_PROVIDER_MODEL`] rather than being rejected.

/// Provider model used when the requested name is not in the table.
pub const DEFAULT_PROVIDER_MODEL: &str = "gemini-2.0-flash-lite";

/// One entry of the alias table.
#[derive(Debug, Clone)]
pub struct ModelAlias {
    pub alias: &'static str,
    pub provider_model: &'static str,
}

const ALIASES: &[ModelAlias] = &[
    ModelAlias {
        alias: "1minai-gpt-4o-mini",
        provider_model: "gpt-4o-mini",
    },
    ModelAlias {
        alias: "1minai-gpt-4o",
        provider_model: "gpt-4o",
    },
    ModelAlias {
        alias: "1minai-claude-3-5-sonnet",
        provider_model: "claude-3-5-sonnet",
    },
    ModelAlias {
        alias: "1minai-claude-3-haiku",
        provider_model: "claude-3-haiku",
    },
    ModelAlias {
        alias: "gpt-4o-mini",
        provider_model: "gpt-4o-mini",
    },
    ModelAlias {
        alias: "gpt-4o",
        provider_model: "gpt-4o",
    },
    ModelAlias {
        alias: "claude-3-5-sonnet",
        provider_model: "claude-3-5-sonnet",
    },
    ModelAlias {
        alias: "claude-3-haiku",
        provider_model: "claude-3-haiku",
    },
    ModelAlias {
        alias: "gemini-2.0-flash-lite",
        provider_model: "gemini-2.0-flash-lite",
    },
    ModelAlias {
        alias: "gemini-2.0-flash",
        provider_model: "gemini-2.0-flash",
    },
    ModelAlias {
        alias: "gemini-1.5-flash",
        provider_model: "gemini-1.5-flash",
    },
    ModelAlias {
        alias: "gemini-1.5-pro",
        provider_model: "gemini-1.5-pro",
    },
];

impl ModelAlias {
    #[must_use]
    pub fn from_name(name: &str) -> Option<&'static ModelAlias> {
        ALIASES.iter().find(|a| a.alias == name)
    }

    #[must_use]
    pub fn all() -> &'static [ModelAlias] {
        ALIASES
    }
}

/// Provider model for a client-facing name, falling back to the default.
#[must_use]
pub fn resolve_provider_model(name: &str) -> &'static str {
    ModelAlias::from_name(name).map_or(DEFAULT_PROVIDER_MODEL, |a| a.provider_model)
}
