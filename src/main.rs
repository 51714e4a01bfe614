//! Deck Drawer - a terminal card-deck widget
//!
//! Fetches a shuffled deck from the deck-of-cards service and lets you draw
//! cards one at a time, by hand or on an automatic timer.

mod api;
mod config;
mod deck;
mod session;
#[cfg(test)]
mod testing;
mod tui;
mod watch;

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use crate::api::DeckClient;
use crate::config::Config;
use crate::session::Session;

const LOG_FILE_NAME: &str = "deck-drawer.log";

/// Deck Drawer - draw cards from a shuffled remote deck
#[derive(Parser)]
#[command(name = "deck-drawer")]
#[command(version)]
#[command(about = "Shuffle a remote deck and draw cards by hand or on a timer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the fullscreen deck widget (default)
    Tui,

    /// Auto-draw without a UI, printing each card as it arrives
    Watch {
        /// Stop after this many cards
        #[arg(short, long)]
        limit: Option<usize>,

        /// Override the auto-draw period in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Show configuration path and effective settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load().unwrap_or_else(|err| {
        eprintln!(
            "{} {}",
            "Could not load config, using defaults:".bright_yellow(),
            err
        );
        Config::default()
    });
    config.api = config.api.with_env_overrides();

    match cli.command {
        Some(Commands::Tui) | None => {
            // Fall back to line output for non-TTY environments (pipes, CI logs).
            if io::stdin().is_terminal() && io::stdout().is_terminal() {
                let log_path = init_file_logging()?;
                let rt = tokio::runtime::Runtime::new()?;
                let session = new_session(&rt, &config);
                if let Err(err) = tui::run_tui(session) {
                    println!(
                        "{} {}",
                        "Could not start Terminal UI:".bright_red(),
                        err.to_string().bright_red()
                    );
                    println!("{} {}", "Log file:".dimmed(), log_path.display());
                }
            } else {
                init_stderr_logging();
                run_watch_command(&config, None)?;
            }
        }
        Some(Commands::Watch { limit, interval_ms }) => {
            init_stderr_logging();
            if let Some(ms) = interval_ms {
                config.draw.interval_ms = ms;
            }
            run_watch_command(&config, limit)?;
        }
        Some(Commands::Config) => {
            let path = Config::config_path()?;
            println!("{} {}", "Config file:".bright_cyan(), path.display());
            if !path.exists() {
                println!("{}", "(not present, showing defaults)".dimmed());
            }
            let rendered =
                toml::to_string_pretty(&config).context("Failed to render config as TOML")?;
            println!("\n{rendered}");
        }
    }

    Ok(())
}

fn new_session(rt: &tokio::runtime::Runtime, config: &Config) -> Session {
    Session::new(
        rt.handle().clone(),
        DeckClient::from_config(&config.api),
        config.draw.interval(),
    )
}

fn run_watch_command(config: &Config, limit: Option<usize>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let session = new_session(&rt, config);
    let printed = watch::run_watch(&rt, session, limit)?;
    println!("{} {}", "Cards drawn:".bright_green(), printed);
    Ok(())
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// The TUI owns the terminal, so logs go to a file in the data dir.
fn init_file_logging() -> Result<PathBuf> {
    let dir = Config::data_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter("deck_drawer=info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("deck_drawer=warn"))
        .with_writer(io::stderr)
        .init();
}
