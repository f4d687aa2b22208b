// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential store trait for the cached provider API key.

use crate::error::MurmurError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Credential;

/// Persists a single API credential.
///
/// Operations are synchronous: each is one brief read or write.
pub trait CredentialStore: PluginAdapter {
    /// Returns the stored credential, or `None` when nothing valid is stored.
    fn load(&self) -> Result<Option<Credential>, MurmurError>;

    /// Validates `candidate` and atomically replaces the stored value.
    ///
    /// Fails with [`MurmurError::InvalidCredentialFormat`] without touching
    /// the store when the candidate is blank or too short.
    fn save(&self, candidate: &str) -> Result<Credential, MurmurError>;

    /// Removes the stored credential. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), MurmurError>;
}
