// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed [`CredentialStore`].

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use murmur_config::model::CredentialsConfig;
use murmur_core::{
    AdapterType, Credential, CredentialStore, HealthStatus, MurmurError, PluginAdapter,
};

/// Stores the API credential in a single file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &CredentialsConfig) -> Self {
        Self::new(&config.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, contents: &str) -> Result<(), MurmurError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(MurmurError::persistence)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(MurmurError::persistence)?;
        tmp.write_all(contents.as_bytes())
            .map_err(MurmurError::persistence)?;
        tmp.as_file().sync_all().map_err(MurmurError::persistence)?;
        restrict_permissions(tmp.path())?;
        tmp.persist(&self.path)
            .map_err(|e| MurmurError::persistence(e.error))?;
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), MurmurError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(MurmurError::persistence)
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), MurmurError> {
    Ok(())
}

#[async_trait]
impl PluginAdapter for FileCredentialStore {
    fn name(&self) -> &str {
        "file"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::CredentialStore
    }

    async fn health_check(&self) -> Result<HealthStatus, MurmurError> {
        match self.load() {
            Ok(Some(_)) => Ok(HealthStatus::Healthy),
            Ok(None) => Ok(HealthStatus::Degraded("no credential stored".to_string())),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), MurmurError> {
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>, MurmurError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(MurmurError::persistence(e)),
        };
        match Credential::parse(&contents) {
            Ok(credential) => Ok(Some(credential)),
            Err(_) => {
                warn!(path = %self.path.display(), "stored credential is malformed, ignoring it");
                Ok(None)
            }
        }
    }

    fn save(&self, candidate: &str) -> Result<Credential, MurmurError> {
        let credential = Credential::parse(candidate)?;
        self.write_atomic(credential.expose())?;
        debug!(path = %self.path.display(), "credential saved");
        Ok(credential)
    }

    fn clear(&self) -> Result<(), MurmurError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "credential cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MurmurError::persistence(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileCredentialStore {
        FileCredentialStore::new(dir.path().join("keys").join("api_key"))
    }

    #[test]
    fn load_without_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_returns_trimmed_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let saved = store.save("  sk-or-v1-abcdef  \n").unwrap();
        assert_eq!(saved.expose(), "sk-or-v1-abcdef");
        assert_eq!(store.load().unwrap(), Some(saved));
    }

    #[test]
    fn invalid_candidate_is_rejected_and_nothing_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(matches!(
            store.save("short"),
            Err(MurmurError::InvalidCredentialFormat { .. })
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn save_replaces_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("sk-or-first-key").unwrap();
        store.save("sk-or-second-key").unwrap();
        assert_eq!(store.load().unwrap().unwrap().expose(), "sk-or-second-key");
    }

    #[test]
    fn malformed_file_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "   \n").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn clear_removes_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("sk-or-v1-abcdef").unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("sk-or-v1-abcdef").unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn health_reflects_stored_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(matches!(
            store.health_check().await.unwrap(),
            HealthStatus::Degraded(_)
        ));
        store.save("sk-or-v1-abcdef").unwrap();
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
        assert_eq!(store.adapter_type(), AdapterType::CredentialStore);
    }
}
