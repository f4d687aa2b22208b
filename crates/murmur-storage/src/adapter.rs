// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the MessageLog trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use murmur_config::model::StorageConfig;
use murmur_core::{AdapterType, HealthStatus, MessageLog, MurmurError, PluginAdapter, Role, Turn};

use crate::database::{map_tr_err, Database};
use crate::queries;

/// SQLite-backed message log.
///
/// The database is opened by [`SqliteMessageLog::initialize`]; every other
/// operation fails with a persistence error until then.
pub struct SqliteMessageLog {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteMessageLog {
    /// Create a new log for the given configuration without opening it.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Create and initialize in one step.
    pub async fn open(config: StorageConfig) -> Result<Self, MurmurError> {
        let log = Self::new(config);
        log.initialize().await?;
        Ok(log)
    }

    /// Open the database and run migrations.
    pub async fn initialize(&self) -> Result<(), MurmurError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db
            .set(db)
            .map_err(|_| MurmurError::persistence("message log already initialized"))?;
        debug!(path = %self.config.database_path, "SQLite message log initialized");
        Ok(())
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &str {
        &self.config.database_path
    }

    fn db(&self) -> Result<&Database, MurmurError> {
        self.db
            .get()
            .ok_or_else(|| MurmurError::persistence("message log not initialized -- call initialize() first"))
    }
}

#[async_trait]
impl PluginAdapter for SqliteMessageLog {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::MessageLog
    }

    async fn health_check(&self) -> Result<HealthStatus, MurmurError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("not initialized".to_string()));
        };
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MurmurError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl MessageLog for SqliteMessageLog {
    async fn append(&self, role: Role, content: &str) -> Result<Turn, MurmurError> {
        queries::messages::insert_message(self.db()?, role, content)
            .await?
            .into_turn()
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Turn>, MurmurError> {
        queries::messages::get_recent_messages(self.db()?, limit)
            .await?
            .into_iter()
            .map(|record| record.into_turn())
            .collect()
    }

    async fn count(&self) -> Result<u64, MurmurError> {
        queries::messages::count_messages(self.db()?).await
    }
}
