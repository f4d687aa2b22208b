// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation session manager for Murmur.
//!
//! The [`SessionManager`] owns the active [`SessionConfig`](murmur_core::SessionConfig)
//! and the bounded working set sent upstream, and drives each request
//! through submit, await and commit-or-fail. It talks to its collaborators
//! only through the traits in `murmur-core`.

pub mod manager;
pub mod state;
pub mod working_set;

pub use manager::{SessionManager, SubmitOutcome};
pub use state::SessionState;
pub use working_set::WorkingSet;
