// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `Vec`-backed message log.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use murmur_core::{
    AdapterType, HealthStatus, MessageLog, MurmurError, PluginAdapter, Role, Turn,
};

/// In-memory [`MessageLog`]. Clones share the same storage.
#[derive(Clone, Default)]
pub struct MemoryMessageLog {
    turns: Arc<Mutex<Vec<Turn>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryMessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log already holding `turns`.
    pub fn with_turns(turns: Vec<Turn>) -> Self {
        Self {
            turns: Arc::new(Mutex::new(turns)),
            fail_writes: Arc::default(),
        }
    }

    /// Make every subsequent `append` fail with a persistence error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of every stored turn.
    pub async fn all(&self) -> Vec<Turn> {
        self.turns.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MemoryMessageLog {
    fn name(&self) -> &str {
        "memory-log"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::MessageLog
    }

    async fn health_check(&self) -> Result<HealthStatus, MurmurError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MurmurError> {
        Ok(())
    }
}

#[async_trait]
impl MessageLog for MemoryMessageLog {
    async fn append(&self, role: Role, content: &str) -> Result<Turn, MurmurError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(MurmurError::persistence("simulated write failure"));
        }
        let mut turns = self.turns.lock().await;
        let mut turn = Turn::new(role, content);
        if let Some(last) = turns.last()
            && last.created_at > turn.created_at
        {
            turn.created_at = last.created_at;
        }
        turns.push(turn.clone());
        Ok(turn)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Turn>, MurmurError> {
        let turns = self.turns.lock().await;
        let start = turns.len().saturating_sub(limit);
        Ok(turns[start..].to_vec())
    }

    async fn count(&self) -> Result<u64, MurmurError> {
        Ok(self.turns.lock().await.len() as u64)
    }
}
