// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter chat-completion adapter for Murmur.
//!
//! This crate implements [`CompletionClient`] against OpenRouter's
//! OpenAI-compatible `/chat/completions` endpoint.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use murmur_config::model::ProviderConfig;
use murmur_core::{
    AdapterType, CompletionClient, CompletionError, Credential, HealthStatus, MurmurError,
    PluginAdapter, Turn,
};
use tracing::info;

pub use crate::client::{ClientOptions, OpenRouterClient, DEFAULT_BASE_URL};

/// OpenRouter provider implementing [`CompletionClient`].
///
/// Holds no credential; the session manager passes one on every call.
pub struct OpenRouterProvider {
    client: OpenRouterClient,
}

impl OpenRouterProvider {
    /// Creates a provider from the `[provider]` configuration section.
    pub fn new(config: &ProviderConfig) -> Result<Self, MurmurError> {
        let client = OpenRouterClient::new(
            &config.base_url,
            ClientOptions {
                timeout: Some(Duration::from_secs(config.timeout_secs)),
                temperature: config.temperature,
                max_tokens: config.max_tokens,
                app_url: config.app_url.clone(),
                app_title: config.app_title.clone(),
            },
        )?;
        info!(endpoint = client.endpoint(), "OpenRouter provider initialized");
        Ok(Self { client })
    }
}

#[async_trait]
impl PluginAdapter for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Completion
    }

    async fn health_check(&self) -> Result<HealthStatus, MurmurError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MurmurError> {
        Ok(())
    }
}

#[async_trait]
impl CompletionClient for OpenRouterProvider {
    async fn complete(
        &self,
        credential: &Credential,
        model_id: &str,
        working_set: &[Turn],
    ) -> Result<String, CompletionError> {
        self.client.complete(credential, model_id, working_set).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::Role;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn provider_reports_adapter_metadata() {
        let provider = OpenRouterProvider::new(&ProviderConfig::default()).unwrap();
        assert_eq!(provider.name(), "openrouter");
        assert_eq!(provider.adapter_type(), AdapterType::Completion);
    }

    #[test]
    fn invalid_title_header_is_a_config_error() {
        let config = ProviderConfig {
            app_title: Some("bad\ntitle".into()),
            ..ProviderConfig::default()
        };
        assert!(matches!(
            OpenRouterProvider::new(&config),
            Err(MurmurError::Config(_))
        ));
    }

    #[tokio::test]
    async fn provider_uses_configured_base_url_and_referer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(header("http-referer", "https://murmur.example"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "pong"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ProviderConfig {
            base_url: format!("{}/api/v1", server.uri()),
            app_url: Some("https://murmur.example".into()),
            ..ProviderConfig::default()
        };
        let provider = OpenRouterProvider::new(&config).unwrap();
        let credential = Credential::parse("sk-or-test-key").unwrap();
        let text = provider
            .complete(&credential, "m", &[Turn::new(Role::User, "ping")])
            .await
            .unwrap();
        assert_eq!(text, "pong");
    }
}
