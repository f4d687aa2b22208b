// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential acquisition via TTY prompt or environment.

use murmur_core::{Credential, CredentialStore, MurmurError};
use tracing::{debug, warn};

/// Environment variable consulted when the store is empty.
pub const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Ask the user for an API key on the terminal without echoing it.
///
/// Returns `Ok(None)` when the user enters an empty line or stdin is not a
/// terminal, which the session treats as declining.
pub fn prompt_for_credential() -> Result<Option<String>, MurmurError> {
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Ok(None);
    }
    let entered = rpassword::prompt_password("OpenRouter API key (empty to quit): ")
        .map_err(|e| MurmurError::Internal(format!("failed to read API key: {e}")))?;
    let entered = entered.trim();
    if entered.is_empty() {
        Ok(None)
    } else {
        Ok(Some(entered.to_string()))
    }
}

/// Populate an empty store from configuration or the environment.
///
/// `configured` takes priority over [`OPENROUTER_API_KEY_ENV`]. An existing
/// stored credential is never overwritten. Returns the credential now cached,
/// if any.
pub fn seed_credential(
    store: &dyn CredentialStore,
    configured: Option<&str>,
) -> Result<Option<Credential>, MurmurError> {
    if let Some(existing) = store.load()? {
        return Ok(Some(existing));
    }

    let from_env = std::env::var(OPENROUTER_API_KEY_ENV).ok();
    let Some(candidate) = configured
        .filter(|s| !s.trim().is_empty())
        .or(from_env.as_deref().filter(|s| !s.trim().is_empty()))
    else {
        return Ok(None);
    };

    match store.save(candidate) {
        Ok(credential) => {
            debug!("credential seeded from configuration");
            Ok(Some(credential))
        }
        Err(MurmurError::InvalidCredentialFormat { reason }) => {
            warn!(%reason, "configured API key is malformed, ignoring it");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
