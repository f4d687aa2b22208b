// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Murmur configuration.
//!
//! Settings are layered from compiled defaults, `murmur.toml` files and
//! `MURMUR_*` environment variables, then checked semantically. Every
//! problem is collected as a [`ConfigError`] the binary can render.

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError, ConfigSource};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::MurmurConfig;

/// Loads from the standard locations and validates.
pub fn load_and_validate() -> Result<MurmurConfig, Vec<ConfigError>> {
    checked(loader::load_config(), || {
        loader::search_paths()
            .iter()
            .filter_map(|p| ConfigSource::read(p))
            .collect()
    })
}

/// Loads `path` (plus environment overrides) and validates.
pub fn load_and_validate_path(path: &Path) -> Result<MurmurConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_path(path), || {
        ConfigSource::read(path).into_iter().collect()
    })
}

/// Parses and validates an in-memory TOML document.
pub fn load_and_validate_str(toml_content: &str) -> Result<MurmurConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_str(toml_content), || {
        vec![ConfigSource::new("<inline>", toml_content)]
    })
}

/// Sources are only read when there is an error to highlight.
fn checked(
    loaded: Result<MurmurConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<ConfigSource>,
) -> Result<MurmurConfig, Vec<ConfigError>> {
    let config = loaded.map_err(|err| diagnostic::from_figment(err, &sources()))?;
    validation::validate_config(&config)?;
    Ok(config)
}
