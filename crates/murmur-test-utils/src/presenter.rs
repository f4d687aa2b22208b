// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Presenter that records callbacks for assertions.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use murmur_core::{Presenter, Role};

/// A callback observed by [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Pending,
    Message(Role, String),
    Error(String),
    CredentialRequested,
}

#[derive(Default)]
struct Inner {
    events: Vec<PresenterEvent>,
    answers: VecDeque<Option<String>>,
}

/// Records every callback. Credential prompts are answered from a script;
/// once the script runs out the user is treated as declining.
///
/// Clones share state, so a test can keep one handle while the session
/// owns the other.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the answers returned by successive credential prompts.
    /// `None` declines.
    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let presenter = Self::new();
        presenter.lock().answers = answers.into_iter().map(|a| a.map(Into::into)).collect();
        presenter
    }

    /// Append one scripted credential answer.
    pub fn push_answer(&self, answer: Option<&str>) {
        self.lock().answers.push_back(answer.map(str::to_string));
    }

    pub fn events(&self) -> Vec<PresenterEvent> {
        self.lock().events.clone()
    }

    /// Texts passed to `on_error`, in order.
    pub fn errors(&self) -> Vec<String> {
        self.lock()
            .events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::Error(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of credential prompts shown.
    pub fn prompt_count(&self) -> usize {
        self.lock()
            .events
            .iter()
            .filter(|e| matches!(e, PresenterEvent::CredentialRequested))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Presenter for RecordingPresenter {
    fn on_pending(&mut self) {
        self.lock().events.push(PresenterEvent::Pending);
    }

    fn on_message(&mut self, role: Role, text: &str) {
        self.lock()
            .events
            .push(PresenterEvent::Message(role, text.to_string()));
    }

    fn on_error(&mut self, text: &str) {
        self.lock().events.push(PresenterEvent::Error(text.to_string()));
    }

    fn on_credential_required(&mut self) -> Option<String> {
        let mut inner = self.lock();
        inner.events.push(PresenterEvent::CredentialRequested);
        inner.answers.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_consumed_then_decline() {
        let mut presenter = RecordingPresenter::with_answers([Some("first-key-123"), None]);
        let handle = presenter.clone();
        assert_eq!(presenter.on_credential_required().as_deref(), Some("first-key-123"));
        assert_eq!(presenter.on_credential_required(), None);
        assert_eq!(presenter.on_credential_required(), None);
        assert_eq!(handle.prompt_count(), 3);
    }
}
