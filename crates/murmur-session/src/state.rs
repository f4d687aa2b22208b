// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session lifecycle states.

/// States in the session FSM.
///
/// `Idle -> Pending -> Idle` for a normal exchange. `AwaitingCredential` is
/// entered at startup without a cached key or after the provider rejects
/// the key; declining there moves to `Terminated`, which is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Ready for a new message.
    Idle,
    /// Waiting for the user to supply an API key.
    AwaitingCredential,
    /// A request is in flight.
    Pending,
    /// The user declined to supply a key. The process should exit.
    Terminated,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::AwaitingCredential => write!(f, "awaiting-credential"),
            SessionState::Pending => write!(f, "pending"),
            SessionState::Terminated => write!(f, "terminated"),
        }
    }
}
