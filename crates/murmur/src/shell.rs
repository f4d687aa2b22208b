// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `murmur chat` command implementation.
//!
//! Interactive REPL with readline history, timestamped chat bubbles, a
//! spinner while a reply is pending, and slash commands for changing the
//! session settings.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use murmur_config::MurmurConfig;
use murmur_core::{MessageLog, MurmurError, Personality, Presenter, Role, SessionConfig};
use murmur_credentials::{prompt_for_credential, seed_credential, FileCredentialStore};
use murmur_openrouter::OpenRouterProvider;
use murmur_session::SessionManager;
use murmur_storage::SqliteMessageLog;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, warn};

use crate::render;

/// Messages shown by a bare `/history`.
const DEFAULT_HISTORY_LIMIT: usize = 20;

/// One parsed line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Message(String),
    Help,
    Settings,
    Model(String),
    Personality(Personality),
    Window(usize),
    History(usize),
    Quit,
    /// A malformed slash command; carries the usage hint.
    Invalid(String),
}

/// Parses a line of input. Returns `None` for blank lines.
pub fn parse_input(line: &str) -> Option<ShellCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Some(ShellCommand::Message(trimmed.to_string()));
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    let command = match (name.as_str(), arg) {
        ("help" | "?", _) => ShellCommand::Help,
        ("settings", _) => ShellCommand::Settings,
        ("quit" | "exit", _) => ShellCommand::Quit,
        ("model", Some(id)) => ShellCommand::Model(id.to_string()),
        ("model", None) => ShellCommand::Invalid("usage: /model <model-id>".into()),
        ("personality", Some(name)) => match Personality::from_str(name) {
            Ok(p) => ShellCommand::Personality(p),
            Err(_) => ShellCommand::Invalid(format!(
                "unknown personality `{name}`; choose one of: {}",
                personality_names()
            )),
        },
        ("personality", None) => ShellCommand::Invalid(format!(
            "usage: /personality <{}>",
            personality_names().replace(", ", "|")
        )),
        ("window", Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => ShellCommand::Window(n),
            _ => ShellCommand::Invalid("context window must be a positive integer".into()),
        },
        ("window", None) => ShellCommand::Invalid("usage: /window <n>".into()),
        ("history", None) => ShellCommand::History(DEFAULT_HISTORY_LIMIT),
        ("history", Some(n)) => match n.parse::<usize>() {
            Ok(n) => ShellCommand::History(n),
            Err(_) => ShellCommand::Invalid("usage: /history [n]".into()),
        },
        (other, _) => ShellCommand::Invalid(format!(
            "unknown command `/{other}`; type /help for a list"
        )),
    };
    Some(command)
}

fn personality_names() -> String {
    Personality::ALL
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Terminal presenter: bubbles on stdout, a spinner while pending.
#[derive(Default)]
pub struct CliPresenter {
    spinner: Option<ProgressBar>,
}

impl CliPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Presenter for CliPresenter {
    fn on_pending(&mut self) {
        self.stop_spinner();
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn on_message(&mut self, role: Role, text: &str) {
        self.stop_spinner();
        render::print_message(role, text, Local::now());
    }

    fn on_error(&mut self, text: &str) {
        self.stop_spinner();
        render::print_error(text);
    }

    fn on_credential_required(&mut self) -> Option<String> {
        self.stop_spinner();
        println!(
            "{}",
            "An OpenRouter API key is required (https://openrouter.ai/keys).".yellow()
        );
        match prompt_for_credential() {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "could not read API key");
                None
            }
        }
    }
}

/// Runs the `murmur chat` REPL.
pub async fn run_chat(config: MurmurConfig) -> Result<(), MurmurError> {
    let log: Arc<SqliteMessageLog> = Arc::new(SqliteMessageLog::open(config.storage.clone()).await?);

    let store = Arc::new(FileCredentialStore::from_config(&config.credentials));
    seed_credential(store.as_ref(), config.provider.api_key.as_deref())?;

    let client = Arc::new(OpenRouterProvider::new(&config.provider)?);

    let mut session = SessionManager::open(
        config.session.to_session_config(),
        log.clone(),
        store,
        client,
        CliPresenter::new(),
    )
    .await?;

    println!("{}", "murmur".bold().green());
    println!("Type {} for commands, {} to exit.\n", "/help".yellow(), "/quit".yellow());

    if let Err(e) = session.ensure_credential() {
        session.shutdown().await?;
        return Err(e);
    }

    for turn in session.history() {
        render::print_turn(turn);
    }

    let mut rl = DefaultEditor::new()
        .map_err(|e| MurmurError::Internal(format!("failed to initialize readline: {e}")))?;
    let prompt = format!("{}> ", "you".blue());

    let outcome = loop {
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break Ok(()),
            Err(e) => break Err(MurmurError::Internal(format!("readline failed: {e}"))),
        };
        let Some(command) = parse_input(&line) else {
            continue;
        };
        if let Err(e) = rl.add_history_entry(line.trim()) {
            debug!(error = %e, "could not record readline history");
        }

        match command {
            ShellCommand::Message(text) => match session.submit(&text).await {
                Ok(_) | Err(MurmurError::EmptyInput) => {}
                Err(MurmurError::Terminated) => break Err(MurmurError::Terminated),
                Err(e) => render::print_error(&format!("Error: {e}")),
            },
            ShellCommand::Help => print_help(),
            ShellCommand::Settings => print_settings(session.config()),
            ShellCommand::Model(id) => reconfigure(&mut session, |c| c.model_id = id),
            ShellCommand::Personality(p) => reconfigure(&mut session, |c| c.personality = p),
            ShellCommand::Window(n) => reconfigure(&mut session, |c| c.context_window = n),
            ShellCommand::History(limit) => match log.recent(limit).await {
                Ok(turns) if turns.is_empty() => println!("{}\n", "no messages yet".dimmed()),
                Ok(turns) => turns.iter().for_each(render::print_turn),
                Err(e) => render::print_error(&format!("Error: {e}")),
            },
            ShellCommand::Quit => break Ok(()),
            ShellCommand::Invalid(hint) => println!("{}\n", hint.yellow()),
        }
    };

    debug!("leaving chat");
    session.shutdown().await?;
    outcome
}

fn reconfigure(session: &mut SessionManager, update: impl FnOnce(&mut SessionConfig)) {
    let mut next = session.config().clone();
    update(&mut next);
    match session.configure(next) {
        Ok(true) => {
            println!("{}", "Settings updated; conversation context reset.".green());
            print_settings(session.config());
        }
        Ok(false) => println!("{}\n", "Settings unchanged.".dimmed()),
        Err(e) => render::print_error(&format!("Error: {e}")),
    }
}

fn print_settings(config: &SessionConfig) {
    println!("  model:          {}", config.model_id);
    println!("  personality:    {}", config.personality);
    println!("  context window: {}\n", config.context_window);
}

fn print_help() {
    println!("  /settings            show the current settings");
    println!("  /model <id>          switch model (e.g. deepseek/deepseek-chat:free)");
    println!("  /personality <name>  one of: {}", personality_names());
    println!("  /window <n>          number of recent messages sent as context");
    println!("  /history [n]         show the last n logged messages");
    println!("  /quit                exit\n");
    println!("  Changing a setting starts a fresh context; the log keeps everything.\n");
}
