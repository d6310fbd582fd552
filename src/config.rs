use crate::error::{ProxyError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.1min.ai";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub reload: bool,
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Resolved once from `provider.api_key_env`; never read from a file.
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            reload: false,
            provider: ProviderConfig::default(),
            api_key: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    "ONEMINAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl ProxyConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProxyError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Search standard locations for a config file.
    /// Priority: CLI arg > CWD > XDG config > home dir. Falls back to defaults
    /// when nothing is found, since everything can also come from the environment.
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<Self> {
        Self::find_and_load_from(explicit_path, &config_search_paths())
    }

    /// Like [`find_and_load`](Self::find_and_load), over an explicit list of candidates.
    pub fn find_and_load_from(
        explicit_path: Option<&Path>,
        candidates: &[PathBuf],
    ) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }

        for candidate in candidates {
            if candidate.exists() {
                tracing::info!(path = %candidate.display(), "Loading config");
                return Self::load(candidate);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Overlay settings from the environment. `lookup` is `std::env::var(..).ok()`
    /// in the binary and a plain map in tests.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("FASTAPI_HOST") {
            self.host = host;
        }

        if let Some(port) = lookup("PORT").or_else(|| lookup("FASTAPI_PORT")) {
            self.port = port.trim().parse().map_err(|_| {
                ProxyError::config(format!("Invalid port '{}' in environment", port))
            })?;
        }

        if let Some(reload) = lookup("FASTAPI_RELOAD") {
            self.reload = reload.eq_ignore_ascii_case("true");
        }

        if let Some(url) = lookup("LITELLM_BASE_URL") {
            self.provider.base_url = url;
        }

        self.api_key = lookup(self.provider.api_key_env.as_str()).filter(|k| !k.trim().is_empty());

        Ok(())
    }

    /// The provider credential, or a configuration error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            ProxyError::config(format!("{} not configured", self.provider.api_key_env))
        })
    }

    pub fn features_url(&self) -> String {
        format!("{}/api/features", self.provider.base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Credential rendering safe for logs.
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            Some(key) => mask_key(key),
            None => "<not set>".to_string(),
        }
    }
}

fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(6).collect();
    format!("{}...({} chars)", prefix, key.chars().count())
}

pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // CWD
    paths.push(PathBuf::from("oneminai-proxy.toml"));

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        paths.push(PathBuf::from(xdg).join("oneminai-proxy").join("config.toml"));
    }

    if let Some(home) = home_dir() {
        paths.push(home.join(".config").join("oneminai-proxy").join("config.toml"));
        paths.push(home.join(".oneminai-proxy.toml"));
    }

    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
