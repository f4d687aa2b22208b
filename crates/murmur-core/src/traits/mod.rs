// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the session manager.
//!
//! Storage, credential and completion adapters extend the [`PluginAdapter`]
//! base trait and use `#[async_trait]` for dynamic dispatch compatibility.
//! The [`Presenter`] is the callback surface of whatever renders the chat.

pub mod adapter;
pub mod completion;
pub mod credentials;
pub mod log;
pub mod presenter;

pub use adapter::PluginAdapter;
pub use completion::CompletionClient;
pub use credentials::CredentialStore;
pub use log::MessageLog;
pub use presenter::Presenter;
