// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading with Figment.
//!
//! Later layers win: compiled defaults, then each file from
//! [`search_paths`], then `MURMUR_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is foreign

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use tracing::debug;

use crate::model::MurmurConfig;

/// Sections that `MURMUR_<SECTION>_<KEY>` variables may address.
const SECTIONS: [&str; 5] = ["general", "session", "provider", "storage", "credentials"];

/// Config files in merge order, lowest precedence first.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/murmur/murmur.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("murmur").join("murmur.toml"));
    }
    paths.push(PathBuf::from("murmur.toml"));
    paths
}

/// Loads from every file in [`search_paths`] plus the environment.
pub fn load_config() -> Result<MurmurConfig, figment::Error> {
    let mut figment = defaults();
    for path in search_paths() {
        if path.exists() {
            debug!(path = %path.display(), "merging config file");
        }
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider()).extract()
}

/// Loads a TOML string over the defaults. The environment is ignored.
pub fn load_config_from_str(toml_content: &str) -> Result<MurmurConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

/// Loads one explicit file plus the environment.
pub fn load_config_from_path(path: &Path) -> Result<MurmurConfig, figment::Error> {
    debug!(path = %path.display(), "loading config file");
    defaults()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

fn defaults() -> Figment {
    Figment::new().merge(Serialized::defaults(MurmurConfig::default()))
}

/// Maps `MURMUR_SESSION_CONTEXT_WINDOW` to `session.context_window`.
///
/// Only the first underscore after the section name separates; key names
/// keep theirs.
fn env_provider() -> Env {
    Env::prefixed("MURMUR_").map(|key| {
        let key = key.as_str().to_ascii_lowercase();
        SECTIONS
            .iter()
            .find_map(|section| {
                key.strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or(key)
            .into()
    })
}
