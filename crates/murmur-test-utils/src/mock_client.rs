// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion client for deterministic testing.
//!
//! Results are popped from a FIFO queue. When the queue is empty a default
//! "mock response" text is returned.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use murmur_core::{
    AdapterType, CompletionClient, CompletionError, Credential, HealthStatus, MurmurError,
    PluginAdapter, Turn,
};

/// One call observed by [`MockCompletionClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The credential value the call was made with.
    pub credential: String,
    pub model_id: String,
    pub working_set: Vec<Turn>,
}

/// A completion client that replays scripted results.
#[derive(Clone, Default)]
pub struct MockCompletionClient {
    results: Arc<Mutex<VecDeque<Result<String, CompletionError>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client pre-loaded with the given results.
    pub fn with_results(results: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::from(results))),
            calls: Arc::default(),
        }
    }

    /// Queue a successful reply.
    pub async fn push_reply(&self, text: impl Into<String>) {
        self.results.lock().await.push_back(Ok(text.into()));
    }

    /// Queue a failure.
    pub async fn push_error(&self, error: CompletionError) {
        self.results.lock().await.push_back(Err(error));
    }

    /// All calls made so far, oldest first.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl PluginAdapter for MockCompletionClient {
    fn name(&self) -> &str {
        "mock-completion"
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
impl CompletionClient for MockCompletionClient {
    async fn complete(
        &self,
        credential: &Credential,
        model_id: &str,
        working_set: &[Turn],
    ) -> Result<String, CompletionError> {
        self.calls.lock().await.push(RecordedCall {
            credential: credential.expose().to_string(),
            model_id: model_id.to_string(),
            working_set: working_set.to_vec(),
        });
        self.results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()))
    }
}
