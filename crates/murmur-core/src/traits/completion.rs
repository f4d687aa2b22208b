// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion client trait for the remote chat-completion provider.

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Credential, Turn};

/// Performs one request/response cycle against the provider.
///
/// Implementations hold no conversation state, must apply a bounded
/// timeout (reported as [`CompletionError::Network`]) and must not retry.
#[async_trait]
pub trait CompletionClient: PluginAdapter {
    /// Sends `working_set` to `model_id` and returns the assistant's reply text.
    async fn complete(
        &self,
        credential: &Credential,
        model_id: &str,
        working_set: &[Turn],
    ) -> Result<String, CompletionError>;
}
