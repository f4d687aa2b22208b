// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: real SQLite log, file credential store and HTTP
//! provider against a mock OpenRouter server.

use std::sync::Arc;

use murmur_config::model::{ProviderConfig, StorageConfig};
use murmur_core::{CompletionError, CredentialStore, MessageLog, Personality, Role, SessionConfig};
use murmur_credentials::FileCredentialStore;
use murmur_openrouter::OpenRouterProvider;
use murmur_session::{SessionManager, SessionState, SubmitOutcome};
use murmur_storage::SqliteMessageLog;
use murmur_test_utils::{PresenterEvent, RecordingPresenter};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GOOD_KEY: &str = "sk-or-v1-good-key-0001";
const BAD_KEY: &str = "sk-or-v1-revoked-key-0002";

fn reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "gen-e2e",
        "model": "deepseek/deepseek-chat:free",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
}

fn unauthorized() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(serde_json::json!({
        "error": {"code": 401, "message": "No auth credentials found"}
    }))
}

struct Harness {
    dir: TempDir,
    base_url: String,
}

impl Harness {
    fn new(server: &MockServer) -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            base_url: format!("{}/api/v1", server.uri()),
        }
    }

    fn storage(&self) -> StorageConfig {
        StorageConfig {
            database_path: self.dir.path().join("murmur.db").display().to_string(),
            wal_mode: true,
        }
    }

    fn store(&self) -> Arc<FileCredentialStore> {
        Arc::new(FileCredentialStore::new(self.dir.path().join("api_key")))
    }

    fn provider(&self) -> Arc<OpenRouterProvider> {
        let config = ProviderConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
            ..ProviderConfig::default()
        };
        Arc::new(OpenRouterProvider::new(&config).unwrap())
    }

    async fn open(
        &self,
        context_window: usize,
        presenter: RecordingPresenter,
    ) -> (SessionManager, Arc<SqliteMessageLog>) {
        let log = Arc::new(SqliteMessageLog::open(self.storage()).await.unwrap());
        let config = SessionConfig {
            model_id: "deepseek/deepseek-chat:free".into(),
            personality: Personality::Friendly,
            context_window,
        };
        let session = SessionManager::open(config, log.clone(), self.store(), self.provider(), presenter)
            .await
            .unwrap();
        (session, log)
    }
}

#[tokio::test]
async fn exchange_is_logged_and_restored_after_reopen() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("authorization", format!("Bearer {GOOD_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("Hello from the model.")))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server);
    let presenter = RecordingPresenter::with_answers([Some(GOOD_KEY)]);
    let (mut session, log) = harness.open(4, presenter.clone()).await;

    let outcome = session.submit("hi there").await.unwrap();
    match outcome {
        SubmitOutcome::Replied(turn) => assert_eq!(turn.content, "Hello from the model."),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(presenter.prompt_count(), 1);
    assert_eq!(log.count().await.unwrap(), 2);
    session.shutdown().await.unwrap();
    drop(session);
    drop(log);

    // The key was cached on disk; a second session needs no prompt.
    let presenter = RecordingPresenter::new();
    let (session, _log) = harness.open(4, presenter.clone()).await;
    assert!(session.has_credential());
    let restored: Vec<_> = session
        .history()
        .map(|t| (t.role, t.content.clone()))
        .collect();
    assert_eq!(
        restored,
        vec![
            (Role::User, "hi there".to_string()),
            (Role::Assistant, "Hello from the model.".to_string()),
        ]
    );
    assert_eq!(presenter.prompt_count(), 0);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejected_key_is_replaced_and_request_retried_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", format!("Bearer {BAD_KEY}").as_str()))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("authorization", format!("Bearer {GOOD_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("Welcome back.")))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server);
    harness.store().save(BAD_KEY).unwrap();

    let presenter = RecordingPresenter::with_answers([Some(GOOD_KEY)]);
    let (mut session, log) = harness.open(10, presenter.clone()).await;

    let outcome = session.submit("am I in?").await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Replied(_)));
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(presenter.prompt_count(), 1);

    // One user turn despite two dispatches.
    let turns = log.recent(10).await.unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].content, "am I in?");

    let stored = harness.store().load().unwrap().unwrap();
    assert_eq!(stored.expose(), GOOD_KEY);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn second_rejection_is_reported_and_session_stays_usable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(unauthorized())
        .expect(2)
        .mount(&server)
        .await;

    let harness = Harness::new(&server);
    harness.store().save(BAD_KEY).unwrap();

    let presenter = RecordingPresenter::with_answers([Some("sk-or-v1-also-revoked-03")]);
    let (mut session, log) = harness.open(10, presenter.clone()).await;

    let outcome = session.submit("hello?").await.unwrap();
    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(CompletionError::AuthenticationRejected(_))
    ));
    assert_eq!(session.state(), SessionState::Idle);
    assert!(!session.has_credential());
    assert!(harness.store().load().unwrap().is_none());
    assert_eq!(presenter.errors().len(), 1);
    assert_eq!(log.count().await.unwrap(), 1);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn unreachable_provider_surfaces_network_error() {
    let server = MockServer::start().await;
    let harness = Harness::new(&server);
    // Nothing listens here once the server is dropped.
    drop(server);
    harness.store().save(GOOD_KEY).unwrap();

    let presenter = RecordingPresenter::new();
    let (mut session, log) = harness.open(10, presenter.clone()).await;

    let outcome = session.submit("anyone there?").await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Failed(CompletionError::Network(_))));
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.has_credential());

    let events = presenter.events();
    assert_eq!(events.first(), Some(&PresenterEvent::Pending));
    assert!(matches!(events.last(), Some(PresenterEvent::Error(msg)) if msg.starts_with("Error: network error")));

    // The user turn stays logged and in context.
    assert_eq!(log.count().await.unwrap(), 1);
    assert_eq!(session.history().count(), 1);
    session.shutdown().await.unwrap();
}
