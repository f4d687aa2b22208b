// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation session manager.
//!
//! One [`SessionManager`] drives one conversation. It is used from a single
//! task through `&mut self`; the remote call is the only awaited I/O and its
//! result is applied before any other mutation can happen.

use std::sync::Arc;

use murmur_core::{
    CompletionClient, CompletionError, Credential, CredentialStore, MessageLog, MurmurError,
    Presenter, Role, SessionConfig, Turn,
};
use tracing::{debug, info, warn};

use crate::state::SessionState;
use crate::working_set::WorkingSet;

/// Result of one submitted user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The provider replied; the stored assistant turn.
    Replied(Turn),
    /// The request failed and the error was shown to the user. The user
    /// turn stays in the log and the working set.
    Failed(CompletionError),
}

/// A dispatched request awaiting its completion.
struct PendingRequest {
    credential: Credential,
    /// Snapshot sent upstream; re-sent unchanged on the authentication retry.
    working_set: Vec<Turn>,
    auth_retried: bool,
}

/// Owns the session configuration and working set and coordinates the
/// message log, credential store, completion client and presenter.
pub struct SessionManager {
    config: SessionConfig,
    state: SessionState,
    working_set: WorkingSet,
    credential: Option<Credential>,
    pending: Option<PendingRequest>,
    log: Arc<dyn MessageLog>,
    credentials: Arc<dyn CredentialStore>,
    client: Arc<dyn CompletionClient>,
    presenter: Box<dyn Presenter>,
}

impl SessionManager {
    /// Opens a session: seeds the working set with the newest
    /// `context_window` logged turns and loads the cached credential.
    pub async fn open(
        config: SessionConfig,
        log: Arc<dyn MessageLog>,
        credentials: Arc<dyn CredentialStore>,
        client: Arc<dyn CompletionClient>,
        presenter: impl Presenter + 'static,
    ) -> Result<Self, MurmurError> {
        config.validate()?;

        let history = log.recent(config.context_window).await?;
        let working_set = WorkingSet::seeded(
            Turn::system(config.personality),
            config.context_window,
            history,
        );
        let credential = credentials.load()?;

        info!(
            model = config.model_id.as_str(),
            personality = %config.personality,
            context_window = config.context_window,
            restored = working_set.history_len(),
            has_credential = credential.is_some(),
            "session opened"
        );

        Ok(Self {
            config,
            state: SessionState::Idle,
            working_set,
            credential,
            pending: None,
            log,
            credentials,
            client,
            presenter: Box::new(presenter),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The turns the next request would send, system turn first.
    pub fn working_set(&self) -> Vec<Turn> {
        self.working_set.to_vec()
    }

    /// Non-system turns of the working set, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Turn> {
        self.working_set.history()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Makes sure a credential is cached, prompting the user if not.
    ///
    /// Fails with [`MurmurError::Terminated`] if the user declines.
    pub fn ensure_credential(&mut self) -> Result<(), MurmurError> {
        match self.state {
            SessionState::Terminated => return Err(MurmurError::Terminated),
            SessionState::Pending => return Err(MurmurError::SessionBusy),
            SessionState::Idle | SessionState::AwaitingCredential => {}
        }
        if self.credential.is_some() {
            return Ok(());
        }

        self.transition(SessionState::AwaitingCredential);
        match self.acquire_credential() {
            Ok(Some(credential)) => {
                self.credential = Some(credential);
                self.transition(SessionState::Idle);
                Ok(())
            }
            Ok(None) => {
                self.transition(SessionState::Terminated);
                Err(MurmurError::Terminated)
            }
            Err(e) => {
                self.transition(SessionState::Idle);
                Err(e)
            }
        }
    }

    /// Applies a settings update. Returns `false` if nothing changed.
    ///
    /// Any change resets the working set to a fresh system turn; logged
    /// history is untouched.
    pub fn configure(&mut self, new_config: SessionConfig) -> Result<bool, MurmurError> {
        match self.state {
            SessionState::Pending => return Err(MurmurError::SessionBusy),
            SessionState::Terminated => return Err(MurmurError::Terminated),
            SessionState::Idle | SessionState::AwaitingCredential => {}
        }
        new_config.validate()?;
        if new_config == self.config {
            return Ok(false);
        }

        self.working_set.reset(
            Turn::system(new_config.personality),
            new_config.context_window,
        );
        info!(
            model = new_config.model_id.as_str(),
            personality = %new_config.personality,
            context_window = new_config.context_window,
            "session reconfigured"
        );
        self.config = new_config;
        Ok(true)
    }

    /// Sends one user message and waits for the outcome.
    ///
    /// Remote failures are reported through the presenter and returned as
    /// [`SubmitOutcome::Failed`]; only local faults are `Err`.
    pub async fn submit(&mut self, user_text: &str) -> Result<SubmitOutcome, MurmurError> {
        self.begin_submit(user_text).await?;
        let result = match self.dispatch().await {
            Ok(result) => result,
            Err(e) => {
                self.abort_request();
                return Err(e);
            }
        };
        match result {
            Ok(reply) => self.on_completion_success(&reply).await,
            Err(error) => self.on_completion_failure(error).await,
        }
    }

    /// Validates, persists and enqueues a user turn, leaving the session
    /// `Pending`. The caller completes the request with
    /// [`on_completion_success`](Self::on_completion_success) or
    /// [`on_completion_failure`](Self::on_completion_failure).
    pub async fn begin_submit(&mut self, user_text: &str) -> Result<(), MurmurError> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(MurmurError::EmptyInput);
        }
        match self.state {
            SessionState::Idle => {}
            SessionState::Terminated => return Err(MurmurError::Terminated),
            SessionState::Pending | SessionState::AwaitingCredential => {
                return Err(MurmurError::SessionBusy);
            }
        }

        // Acquired before anything is written, so declining leaves no trace.
        self.ensure_credential()?;
        let credential = self
            .credential
            .clone()
            .ok_or_else(|| MurmurError::Internal("credential missing after acquisition".into()))?;

        let turn = self.log.append(Role::User, text).await?;
        self.working_set.push(turn);
        self.pending = Some(PendingRequest {
            credential,
            working_set: self.working_set.to_vec(),
            auth_retried: false,
        });
        self.transition(SessionState::Pending);
        self.presenter.on_pending();
        Ok(())
    }

    /// Commits the assistant's reply to the pending request.
    ///
    /// A blank reply is not stored; it fails the request as a malformed
    /// response.
    pub async fn on_completion_success(
        &mut self,
        assistant_text: &str,
    ) -> Result<SubmitOutcome, MurmurError> {
        self.pending_request()?;
        if assistant_text.trim().is_empty() {
            let error = CompletionError::MalformedResponse("reply has no content".into());
            return Ok(self.fail_request(error));
        }

        let turn = match self.log.append(Role::Assistant, assistant_text).await {
            Ok(turn) => turn,
            Err(e) => {
                self.abort_request();
                return Err(e);
            }
        };
        self.working_set.push(turn.clone());
        self.pending = None;
        self.transition(SessionState::Idle);
        self.presenter.on_message(Role::Assistant, &turn.content);
        Ok(SubmitOutcome::Replied(turn))
    }

    /// Resolves the pending request with a failure.
    ///
    /// A rejected credential is cleared and the user is asked for a new one;
    /// the same working set is then sent once more. A second rejection, or
    /// any other failure, is shown to the user and the session returns to
    /// `Idle`.
    pub async fn on_completion_failure(
        &mut self,
        mut error: CompletionError,
    ) -> Result<SubmitOutcome, MurmurError> {
        loop {
            let already_retried = self.pending_request()?.auth_retried;

            if !error.is_authentication_rejected() {
                return Ok(self.fail_request(error));
            }

            warn!("provider rejected the API credential");
            if let Err(e) = self.invalidate_credential() {
                self.abort_request();
                return Err(e);
            }
            if already_retried {
                return Ok(self.fail_request(error));
            }

            self.transition(SessionState::AwaitingCredential);
            let credential = match self.acquire_credential() {
                Ok(Some(credential)) => credential,
                Ok(None) => {
                    self.pending = None;
                    self.transition(SessionState::Terminated);
                    return Err(MurmurError::Terminated);
                }
                Err(e) => {
                    self.abort_request();
                    return Err(e);
                }
            };
            self.credential = Some(credential.clone());
            if let Some(pending) = self.pending.as_mut() {
                pending.credential = credential;
                pending.auth_retried = true;
            }
            self.transition(SessionState::Pending);
            self.presenter.on_pending();

            debug!("re-dispatching request with new credential");
            match self.dispatch().await? {
                Ok(reply) => return self.on_completion_success(&reply).await,
                Err(next) => error = next,
            }
        }
    }

    /// Shuts down every collaborator.
    pub async fn shutdown(&self) -> Result<(), MurmurError> {
        self.client.shutdown().await?;
        self.credentials.shutdown().await?;
        self.log.shutdown().await
    }

    async fn dispatch(&self) -> Result<Result<String, CompletionError>, MurmurError> {
        let pending = self.pending_request()?;
        debug!(
            model = self.config.model_id.as_str(),
            turns = pending.working_set.len(),
            "dispatching completion request"
        );
        Ok(self
            .client
            .complete(&pending.credential, &self.config.model_id, &pending.working_set)
            .await)
    }

    /// Prompts until a well-formed credential is saved or the user declines.
    fn acquire_credential(&mut self) -> Result<Option<Credential>, MurmurError> {
        loop {
            let Some(candidate) = self.presenter.on_credential_required() else {
                return Ok(None);
            };
            match self.credentials.save(&candidate) {
                Ok(credential) => {
                    info!("API credential accepted");
                    return Ok(Some(credential));
                }
                Err(MurmurError::InvalidCredentialFormat { reason }) => {
                    self.presenter
                        .on_error(&format!("Error: invalid API key: {reason}"));
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn invalidate_credential(&mut self) -> Result<(), MurmurError> {
        self.credential = None;
        self.credentials.clear()
    }

    fn fail_request(&mut self, error: CompletionError) -> SubmitOutcome {
        warn!(error = %error, "completion failed");
        self.presenter.on_error(&format!("Error: {error}"));
        self.pending = None;
        self.transition(SessionState::Idle);
        SubmitOutcome::Failed(error)
    }

    /// Drops the pending request after a local fault.
    fn abort_request(&mut self) {
        self.pending = None;
        if self.state != SessionState::Terminated {
            self.transition(SessionState::Idle);
        }
    }

    fn pending_request(&self) -> Result<&PendingRequest, MurmurError> {
        self.pending
            .as_ref()
            .ok_or_else(|| MurmurError::Internal("no request is pending".into()))
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            debug!(from = %self.state, to = %next, "session state transition");
            self.state = next;
        }
    }
}
