// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for the `messages` table.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use murmur_core::{MurmurError, Role, Turn};

/// One row of the `messages` table as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub id: i64,
    pub role: String,
    pub content: String,
    /// RFC 3339 UTC timestamp with microsecond precision.
    pub created_at: String,
}

impl MessageRecord {
    /// Converts the stored row into a [`Turn`].
    pub fn into_turn(self) -> Result<Turn, MurmurError> {
        let role = Role::from_str(&self.role).map_err(|_| {
            MurmurError::persistence(format!(
                "message {} has unknown role `{}`",
                self.id, self.role
            ))
        })?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| {
                MurmurError::persistence(format!(
                    "message {} has invalid timestamp `{}`: {e}",
                    self.id, self.created_at
                ))
            })?
            .with_timezone(&Utc);
        Ok(Turn {
            role,
            content: self.content,
            created_at,
        })
    }
}
