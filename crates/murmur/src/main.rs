// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Murmur - a terminal chat client for OpenRouter.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod doctor;
mod history;
mod render;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use murmur_config::MurmurConfig;
use murmur_core::{CredentialStore, MurmurError};
use murmur_credentials::FileCredentialStore;

/// Murmur - a terminal chat client for OpenRouter.
#[derive(Parser, Debug)]
#[command(name = "murmur", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive chat session (the default).
    Chat,
    /// Print the most recent logged messages.
    History {
        /// Number of messages to print.
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Check configuration, storage, credentials and provider reachability.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Remove the stored API key.
    Logout,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => murmur_config::load_and_validate_path(path),
        None => murmur_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            murmur_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.general.log_level);

    let result = match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => shell::run_chat(config).await,
        Commands::History { limit } => history::run_history(&config, limit).await,
        Commands::Doctor { plain } => doctor::run_doctor(&config, plain).await,
        Commands::Logout => run_logout(&config),
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Clears the cached API key.
fn run_logout(config: &MurmurConfig) -> Result<(), MurmurError> {
    let store = FileCredentialStore::from_config(&config.credentials);
    store.clear()?;
    println!("API key removed from {}", store.path().display());
    Ok(())
}

/// Initializes the tracing subscriber on stderr with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("murmur={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
