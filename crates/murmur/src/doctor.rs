// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `murmur doctor` command implementation.
//!
//! Runs diagnostic checks against the local environment and the provider.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use colored::Colorize;
use murmur_config::MurmurConfig;
use murmur_core::{HealthStatus, MessageLog, MurmurError, PluginAdapter};
use murmur_credentials::FileCredentialStore;
use murmur_storage::SqliteMessageLog;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }

    fn from_health(name: &str, health: HealthStatus, healthy: &str, start: Instant) -> Self {
        match health {
            HealthStatus::Healthy => Self::new(name, CheckStatus::Pass, healthy, start),
            HealthStatus::Degraded(msg) => Self::new(name, CheckStatus::Warn, msg, start),
            HealthStatus::Unhealthy(msg) => Self::new(name, CheckStatus::Fail, msg, start),
        }
    }
}

/// Run the `murmur doctor` command. With `plain`, disables colored output.
pub async fn run_doctor(config: &MurmurConfig, plain: bool) -> Result<(), MurmurError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_config(config),
        check_database(config).await,
        check_credentials(config).await,
        check_provider(config).await,
    ];

    println!();
    println!("  murmur doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", format_result(result, use_color));
    }
    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(())
}

fn format_result(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    let (tag, symbol, message) = match result.status {
        CheckStatus::Pass => ("[OK]  ", "✓".green(), result.message.normal()),
        CheckStatus::Warn => ("[WARN]", "!".yellow(), result.message.yellow()),
        CheckStatus::Fail => ("[FAIL]", "✗".red(), result.message.red()),
    };
    if use_color {
        format!("    {symbol} {:<14} {message} ({duration_ms}ms)", result.name)
    } else {
        format!(
            "    {tag} {:<14} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

/// Summarizes the effective configuration.
fn check_config(config: &MurmurConfig) -> CheckResult {
    let start = Instant::now();
    CheckResult::new(
        "Configuration",
        CheckStatus::Pass,
        format!(
            "model={} personality={} window={}",
            config.session.model, config.session.personality, config.session.context_window
        ),
        start,
    )
}

/// Opens the message log (running migrations) and counts stored messages.
async fn check_database(config: &MurmurConfig) -> CheckResult {
    let start = Instant::now();
    let log = match SqliteMessageLog::open(config.storage.clone()).await {
        Ok(log) => log,
        Err(e) => {
            return CheckResult::new("Database", CheckStatus::Fail, format!("open failed: {e}"), start);
        }
    };
    let result = match (log.health_check().await, log.count().await) {
        (Ok(HealthStatus::Healthy), Ok(count)) => CheckResult::new(
            "Database",
            CheckStatus::Pass,
            format!("{count} messages in {}", log.path()),
            start,
        ),
        (Err(e), _) | (_, Err(e)) => {
            CheckResult::new("Database", CheckStatus::Fail, format!("query failed: {e}"), start)
        }
        (Ok(health), Ok(_)) => CheckResult::from_health("Database", health, "connected", start),
    };
    let _ = log.shutdown().await;
    result
}

/// Checks whether an API key is stored or configured.
async fn check_credentials(config: &MurmurConfig) -> CheckResult {
    let start = Instant::now();
    let store = FileCredentialStore::from_config(&config.credentials);
    match store.health_check().await {
        Ok(HealthStatus::Degraded(_))
            if config.provider.api_key.is_some()
                || std::env::var(murmur_credentials::OPENROUTER_API_KEY_ENV).is_ok() =>
        {
            CheckResult::new(
                "API key",
                CheckStatus::Pass,
                "provided by configuration or environment",
                start,
            )
        }
        Ok(HealthStatus::Degraded(_)) => CheckResult::new(
            "API key",
            CheckStatus::Warn,
            "not stored (you will be prompted on first use)",
            start,
        ),
        Ok(health) => CheckResult::from_health(
            "API key",
            health,
            &format!("stored in {}", store.path().display()),
            start,
        ),
        Err(e) => CheckResult::new("API key", CheckStatus::Fail, e.to_string(), start),
    }
}

/// Checks the provider endpoint is reachable. Any HTTP answer counts.
async fn check_provider(config: &MurmurConfig) -> CheckResult {
    let start = Instant::now();
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            return CheckResult::new(
                "Provider",
                CheckStatus::Fail,
                format!("HTTP client error: {e}"),
                start,
            );
        }
    };

    let url = format!("{}/models", config.provider.base_url.trim_end_matches('/'));
    match client.get(&url).send().await {
        Ok(resp) => CheckResult::new(
            "Provider",
            CheckStatus::Pass,
            format!("reachable ({})", resp.status()),
            start,
        ),
        Err(e) => {
            let msg = if e.is_timeout() {
                "timeout (5s)".to_string()
            } else {
                format!("unreachable: {e}")
            };
            CheckResult::new("Provider", CheckStatus::Fail, msg, start)
        }
    }
}
