// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Murmur.
//!
//! Provides in-memory fakes of every session collaborator so session
//! behavior can be tested without a database, a filesystem or a network.
//!
//! # Components
//!
//! - [`MockCompletionClient`] - scripted replies, records every request
//! - [`MemoryMessageLog`] - `Vec`-backed log with injectable write failures
//! - [`MemoryCredentialStore`] - in-memory credential slot with call counters
//! - [`RecordingPresenter`] - captures callbacks and answers credential prompts

pub mod memory_credentials;
pub mod memory_log;
pub mod mock_client;
pub mod presenter;

pub use memory_credentials::MemoryCredentialStore;
pub use memory_log::MemoryMessageLog;
pub use mock_client::{MockCompletionClient, RecordedCall};
pub use presenter::{PresenterEvent, RecordingPresenter};
