//! catalogbot - Telegram bot for looking up journals in the catalog.

use anyhow::{Context, Result};
use catalogbot_bot::{config, logging, state, telegram};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use teloxide::Bot;

use config::{Backend, Config};
use logging::{LogConfig, LogFormat};
use state::AppState;

/// catalogbot - journal catalog lookup over Telegram.
#[derive(Parser, Debug)]
#[command(name = "catalogbot")]
#[command(about = "Telegram bot for searching the journal catalog by ISSN, direction code or title")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read the catalog from this SQLite file instead of Postgres
    #[arg(long, value_name = "PATH")]
    sqlite: Option<PathBuf>,

    /// Enable verbose logging (INFO level for most targets)
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace logging (TRACE level for everything)
    #[arg(long)]
    trace: bool,

    /// Quiet mode (WARN and ERROR only)
    #[arg(short, long)]
    quiet: bool,

    /// Set log level for specific targets (e.g., "query=debug" or "teloxide=trace")
    /// Can be specified multiple times. Targets are prefixed with "catalogbot::" automatically.
    #[arg(long = "log", value_name = "TARGET=LEVEL")]
    log_overrides: Vec<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_cli(
        cli.verbose,
        cli.debug,
        cli.trace,
        cli.quiet,
        cli.log_overrides,
        cli.log_format,
    );
    logging::init(&log_config);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env()?;

    // CLI overrides
    if let Some(path) = cli.sqlite {
        config.database.backend = Backend::Sqlite;
        config.database.path = Some(path);
    }

    config.validate()?;
    tracing::info!(
        target: "catalogbot::startup",
        "Loaded configuration (backend: {})",
        config.database.backend
    );

    let state = Arc::new(AppState::new(&config)?);
    tracing::info!(target: "catalogbot::startup", "Initialized application state");

    let token = config
        .bot_token
        .take()
        .context("Bot token is not configured")?;
    let bot = Bot::new(token);

    telegram::run(bot, state.clone()).await;

    tracing::info!(
        target: "catalogbot::startup",
        "Shutting down ({} users had a stored list)",
        state.sessions.len()
    );
    Ok(())
}
