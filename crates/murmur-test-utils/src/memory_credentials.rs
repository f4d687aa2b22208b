// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory credential store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use murmur_core::{
    AdapterType, Credential, CredentialStore, HealthStatus, MurmurError, PluginAdapter,
};

/// In-memory [`CredentialStore`]. Clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    slot: Arc<Mutex<Option<Credential>>>,
    saves: Arc<AtomicUsize>,
    clears: Arc<AtomicUsize>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `value`.
    ///
    /// # Panics
    /// Panics if `value` is not a well-formed credential.
    pub fn with_credential(value: &str) -> Self {
        let store = Self::new();
        let credential = Credential::parse(value).expect("test credential must be well-formed");
        *store.lock() = Some(credential);
        store
    }

    /// The currently stored value, if any.
    pub fn current(&self) -> Option<String> {
        self.lock().as_ref().map(|c| c.expose().to_string())
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of `clear` calls.
    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Credential>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PluginAdapter for MemoryCredentialStore {
    fn name(&self) -> &str {
        "memory-credentials"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::CredentialStore
    }

    async fn health_check(&self) -> Result<HealthStatus, MurmurError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MurmurError> {
        Ok(())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>, MurmurError> {
        Ok(self.lock().clone())
    }

    fn save(&self, candidate: &str) -> Result<Credential, MurmurError> {
        let credential = Credential::parse(candidate)?;
        *self.lock() = Some(credential.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(credential)
    }

    fn clear(&self) -> Result<(), MurmurError> {
        *self.lock() = None;
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
