// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `murmur.toml` schema.
//!
//! Every section rejects unknown keys so typos surface at startup.

use murmur_core::{Personality, SessionConfig};
use serde::{Deserialize, Serialize};

/// The whole config file. Each section may be omitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MurmurConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Initial conversation settings.
    #[serde(default)]
    pub session: SessionSettings,

    /// Chat-completion provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Message log settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// API key cache settings.
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Default filter level for the `murmur` crates. `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Conversation settings applied when a session starts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSettings {
    /// Provider model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Persona preset for the system prompt.
    #[serde(default)]
    pub personality: Personality,

    /// Number of most-recent user/assistant messages sent with each request.
    #[serde(default = "default_context_window")]
    pub context_window: usize,
}

impl SessionSettings {
    /// Converts these settings into the session manager's configuration.
    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig::new(self.model.clone(), self.personality, self.context_window)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            personality: Personality::default(),
            context_window: default_context_window(),
        }
    }
}

fn default_model() -> String {
    "deepseek/deepseek-chat:free".to_string()
}

fn default_context_window() -> usize {
    10
}

/// Chat-completion provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Base URL of the OpenAI-compatible API; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key used to seed the credential store when it is empty.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds. A timed-out request is a network error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature. Omitted from requests when unset.
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate. Omitted from requests when unset.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Sent as `HTTP-Referer` for OpenRouter app attribution.
    #[serde(default)]
    pub app_url: Option<String>,

    /// Sent as `X-Title` for OpenRouter app attribution.
    #[serde(default = "default_app_title")]
    pub app_title: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            temperature: None,
            max_tokens: None,
            app_url: None,
            app_title: default_app_title(),
        }
    }
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_app_title() -> Option<String> {
    Some("Murmur".to_string())
}

/// Message log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite file holding the message log. Parent directories are created.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Use write-ahead journaling.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("murmur").join("murmur.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("murmur.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// API key cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsConfig {
    /// File holding the cached provider API key.
    #[serde(default = "default_credentials_path")]
    pub path: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            path: default_credentials_path(),
        }
    }
}

fn default_credentials_path() -> String {
    dirs::config_dir()
        .map(|p| p.join("murmur").join("api_key"))
        .unwrap_or_else(|| std::path::PathBuf::from("murmur_api_key"))
        .to_string_lossy()
        .into_owned()
}
