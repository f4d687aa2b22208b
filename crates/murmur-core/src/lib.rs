// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Murmur.
//!
//! This crate provides the conversation types, error taxonomy and
//! collaborator traits shared by the session manager, the storage,
//! credential and provider adapters, and the terminal front end.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{CompletionError, MurmurError};
pub use types::{
    AdapterType, Credential, HealthStatus, Personality, Role, SessionConfig, Turn,
    MIN_CREDENTIAL_LEN,
};

pub use traits::{CompletionClient, CredentialStore, MessageLog, PluginAdapter, Presenter};
