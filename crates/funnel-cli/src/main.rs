//! funnel - innovation funnel board CLI
//!
//! Loads challenges from the backend, groups them into stage columns and
//! moves them through the funnel.
//!
//! # Examples
//!
//! ```bash
//! # Show the board
//! funnel board --pretty
//!
//! # Move a challenge to pre-screening
//! funnel move 42 pretriagem
//!
//! # Reload every 10 seconds
//! funnel watch --interval 10
//! ```

mod cli;
mod commands;
mod error;
mod logger;
mod runner;


use crate::{cli::Cli, commands::Commands, error::Result as CliResult};

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use funnel_board::{BoardOptions, FunnelBoardController};
use funnel_client::HttpChallengeBackend;
use funnel_config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let mut config = Config::load()?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let log_file = log_file_path(&config)?;
    logger::initialize(&config.logging, log_file)?;
    if log::log_enabled!(log::Level::Debug) {
        config.log_summary();
    }

    let backend = HttpChallengeBackend::from_config(&config)?;
    let controller = Arc::new(FunnelBoardController::new(
        backend,
        BoardOptions::from_config(&config.board),
    )?);

    match cli.command {
        Commands::Watch { interval } => {
            let interval = runner::watch_interval(interval, config.board.poll_interval());
            runner::watch(controller, interval, cli.pretty).await
        }
        command => {
            let value = runner::execute(command, &controller).await?;
            runner::print_json(&value, cli.pretty)
        }
    }
}

/// Resolve `logging.file` against the config directory
fn log_file_path(config: &Config) -> CliResult<Option<PathBuf>> {
    let Some(ref filename) = config.logging.file else {
        return Ok(None);
    };

    let path = PathBuf::from(filename);
    if path.is_absolute() {
        return Ok(Some(path));
    }

    let config_dir = Config::config_dir()?;
    if let Some(parent) = config_dir.join(&path).parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| error::CliError::logger(format!("Failed to create log directory: {e}")))?;
    }
    Ok(Some(config_dir.join(path)))
}
