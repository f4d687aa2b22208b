// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! API credential cache for Murmur.
//!
//! The credential is kept in a single plain-text file owned by the user
//! (mode `0600` on Unix). Writes go through a temporary file in the same
//! directory followed by a rename, so a crash never leaves a truncated key
//! behind.

pub mod prompt;
pub mod store;

pub use prompt::{prompt_for_credential, seed_credential, OPENROUTER_API_KEY_ENV};
pub use store::FileCredentialStore;
