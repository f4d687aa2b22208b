// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenRouter chat-completions API.
//!
//! Provides [`OpenRouterClient`] which builds requests, attaches the
//! per-call bearer credential and classifies failures. It performs exactly
//! one HTTP attempt per call; retry policy belongs to the caller.

use std::time::Duration;

use murmur_core::{CompletionError, Credential, MurmurError, Turn};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatMessage, ChatRequest, ChatResponse};

/// Default OpenRouter API root.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Attribution and sampling options sent with every request.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub timeout: Option<Duration>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Sent as `HTTP-Referer`.
    pub app_url: Option<String>,
    /// Sent as `X-Title`.
    pub app_title: Option<String>,
}

/// HTTP client for OpenRouter.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenRouterClient {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: &str, options: ClientOptions) -> Result<Self, MurmurError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        if let Some(url) = &options.app_url {
            headers.insert(
                "HTTP-Referer",
                HeaderValue::from_str(url).map_err(|e| {
                    MurmurError::Config(format!("invalid app_url header value: {e}"))
                })?,
            );
        }
        if let Some(title) = &options.app_title {
            headers.insert(
                "X-Title",
                HeaderValue::from_str(title).map_err(|e| {
                    MurmurError::Config(format!("invalid app_title header value: {e}"))
                })?,
            );
        }

        let timeout = options.timeout.unwrap_or(Duration::from_secs(60));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| MurmurError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: chat_endpoint(base_url),
            timeout,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the request body for `model_id` and `working_set`.
    pub fn build_request(&self, model_id: &str, working_set: &[Turn]) -> ChatRequest {
        ChatRequest {
            model: model_id.to_string(),
            messages: working_set.iter().map(ChatMessage::from).collect(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Sends one completion request and returns the assistant's reply text.
    pub async fn complete(
        &self,
        credential: &Credential,
        model_id: &str,
        working_set: &[Turn],
    ) -> Result<String, CompletionError> {
        let request = self.build_request(model_id, working_set);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(status = %status, model = model_id, messages = request.messages.len(), "completion response received");

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(classify_failure(status, &body));
        }
        parse_success(&body)
    }

    fn transport_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Network(format!(
                "request timed out after {}s",
                self.timeout.as_secs()
            ))
        } else {
            CompletionError::Network(format!("HTTP request failed: {e}"))
        }
    }
}

fn chat_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Maps a non-2xx response to a [`CompletionError`].
pub fn classify_failure(status: StatusCode, body: &str) -> CompletionError {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|r| r.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status.to_string()
            } else {
                trimmed.to_string()
            }
        });

    if status == StatusCode::UNAUTHORIZED {
        CompletionError::AuthenticationRejected(message)
    } else {
        CompletionError::Remote {
            status: Some(status.as_u16()),
            message,
        }
    }
}

/// Extracts the reply text from a 2xx body.
pub fn parse_success(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::MalformedResponse(format!("invalid JSON: {e}")))?;

    if let Some(error) = parsed.error {
        let code = error.numeric_code();
        return Err(if code == Some(401) {
            CompletionError::AuthenticationRejected(error.message)
        } else {
            CompletionError::Remote {
                status: code,
                message: error.message,
            }
        });
    }

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::MalformedResponse("response has no choices".into()))?;

    choice
        .message
        .content
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| CompletionError::MalformedResponse("first choice has no content".into()))
}
