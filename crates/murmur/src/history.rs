// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `murmur history` command implementation.

use colored::Colorize;
use murmur_config::MurmurConfig;
use murmur_core::{MessageLog, MurmurError, PluginAdapter};
use murmur_storage::SqliteMessageLog;

use crate::render;

/// Prints the newest `limit` logged messages, oldest first.
pub async fn run_history(config: &MurmurConfig, limit: usize) -> Result<(), MurmurError> {
    let log = SqliteMessageLog::open(config.storage.clone()).await?;
    let total = log.count().await?;
    let turns = log.recent(limit).await?;

    if turns.is_empty() {
        println!("{}", "no messages yet".dimmed());
    } else {
        for turn in &turns {
            render::print_turn(turn);
        }
        println!(
            "{}",
            format!("showing {} of {total} messages", turns.len()).dimmed()
        );
    }

    log.shutdown().await
}
