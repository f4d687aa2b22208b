// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema migrations, compiled in from `migrations/`.

use murmur_core::MurmurError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Applies any migration not yet recorded in the database.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), MurmurError> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(MurmurError::persistence)?;
    Ok(())
}
