// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Callback surface of the presentation layer.

use crate::types::Role;

/// Receives session lifecycle events and renders them.
pub trait Presenter: Send {
    /// A request was dispatched and its reply is pending.
    fn on_pending(&mut self);

    /// A message should be displayed.
    fn on_message(&mut self, role: Role, text: &str);

    /// An error should be displayed. The text already carries its prefix.
    fn on_error(&mut self, text: &str);

    /// The session needs an API credential. `None` means the user declined.
    fn on_credential_required(&mut self) -> Option<String>;
}
