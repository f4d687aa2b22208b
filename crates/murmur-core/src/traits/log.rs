// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message log trait for durable conversation history.

use async_trait::async_trait;

use crate::error::MurmurError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Role, Turn};

/// Append-only record of every exchanged message.
#[async_trait]
pub trait MessageLog: PluginAdapter {
    /// Durably appends a message and returns the stored turn.
    ///
    /// Timestamps are monotonically non-decreasing across the log. A write
    /// failure is returned as [`MurmurError::Persistence`].
    async fn append(&self, role: Role, content: &str) -> Result<Turn, MurmurError>;

    /// Returns at most `limit` most-recent turns, oldest first.
    async fn recent(&self, limit: usize) -> Result<Vec<Turn>, MurmurError>;

    /// Returns the number of stored messages.
    async fn count(&self) -> Result<u64, MurmurError>;
}
