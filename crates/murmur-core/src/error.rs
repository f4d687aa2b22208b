// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Murmur.

use thiserror::Error;

/// The primary error type used across Murmur collaborators and the session manager.
#[derive(Debug, Error)]
pub enum MurmurError {
    /// The submitted text was blank after trimming.
    #[error("message is empty")]
    EmptyInput,

    /// A candidate API credential failed local format validation.
    #[error("invalid credential format: {reason}")]
    InvalidCredentialFormat { reason: String },

    /// The remote completion call failed.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// The message log or credential file could not be read or written.
    #[error("persistence error: {source}")]
    Persistence {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Invalid session or application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A request is already in flight for this session.
    #[error("a request is already pending")]
    SessionBusy,

    /// The user declined to supply a credential; the session cannot continue.
    #[error("no API credential supplied, session terminated")]
    Terminated,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MurmurError {
    /// Wraps any error as a [`MurmurError::Persistence`].
    pub fn persistence<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        MurmurError::Persistence { source: err.into() }
    }
}

/// Classification of a failed remote completion call.
///
/// The session manager decides the retry policy from this classification;
/// clients never retry on their own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// The provider rejected the credential (HTTP 401).
    #[error("authentication rejected: {0}")]
    AuthenticationRejected(String),

    /// Transport failure, including timeouts.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered but the body could not be interpreted.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The provider reported an error.
    #[error("provider error: {message}")]
    Remote {
        status: Option<u16>,
        message: String,
    },
}

impl CompletionError {
    pub fn is_authentication_rejected(&self) -> bool {
        matches!(self, CompletionError::AuthenticationRejected(_))
    }
}
