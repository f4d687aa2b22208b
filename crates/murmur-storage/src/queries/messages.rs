// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message persistence operations.
//!
//! Messages are append-only. `created_at` never moves backwards: an insert
//! whose wall-clock time is earlier than the newest stored row reuses that
//! row's timestamp, so ordering by `id` and by `created_at` always agree.

use chrono::{DateTime, SecondsFormat, Utc};
use murmur_core::{MurmurError, Role};
use rusqlite::OptionalExtension;

use crate::database::{map_tr_err, Database};
use crate::models::MessageRecord;

/// Picks the timestamp for a new row given the newest stored one.
pub fn next_timestamp(previous: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    match previous {
        Some(prev) if prev > now => prev,
        _ => now,
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Insert a message and return the stored row.
pub async fn insert_message(
    db: &Database,
    role: Role,
    content: &str,
) -> Result<MessageRecord, MurmurError> {
    let role = role.to_string();
    let content = content.to_string();
    db.connection()
        .call(move |conn| -> Result<MessageRecord, rusqlite::Error> {
            let tx = conn.transaction()?;
            let last: Option<String> = tx
                .query_row(
                    "SELECT created_at FROM messages ORDER BY id DESC LIMIT 1",
                    [],
                    |row| row.get(0),
                )
                .optional()?;
            let previous = last
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|ts| ts.with_timezone(&Utc));
            let created_at = format_timestamp(next_timestamp(previous, Utc::now()));

            tx.execute(
                "INSERT INTO messages (role, content, created_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![role, content, created_at],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;

            Ok(MessageRecord {
                id,
                role,
                content,
                created_at,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// The newest `limit` messages, oldest first.
pub async fn get_recent_messages(
    db: &Database,
    limit: usize,
) -> Result<Vec<MessageRecord>, MurmurError> {
    if limit == 0 {
        return Ok(Vec::new());
    }
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    db.connection()
        .call(move |conn| -> Result<Vec<MessageRecord>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, role, content, created_at FROM (
                     SELECT id, role, content, created_at FROM messages
                     ORDER BY id DESC LIMIT ?1
                 ) ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(rusqlite::params![limit], |row| {
                Ok(MessageRecord {
                    id: row.get(0)?,
                    role: row.get(1)?,
                    content: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Total number of stored messages.
pub async fn count_messages(db: &Database) -> Result<u64, MurmurError> {
    db.connection()
        .call(|conn| -> Result<i64, rusqlite::Error> {
            conn.query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))
        })
        .await
        .map_err(map_tr_err)
        .map(|n| u64::try_from(n).unwrap_or(0))
}
