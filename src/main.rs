//! Main entry point for the application.
//!
//! Initializes logging, loads environment variables and configuration,
//! then runs one of the subcommands:
//! - `serve` starts the reference workflow backend
//! - `edit` opens an interactive edit session against a backend
//! - `validate` checks a definition file

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, warn};
use workflow_editor::cli::{Cli, Command};
use workflow_editor::{commands, config, utils};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    utils::init_logging(&cli.logging_level, cli.log_dir.as_deref());

    if let Err(e) = dotenvy::dotenv() {
        warn!("Failed to load .env file: {}", e);
    }

    let mut config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    config.apply_env();

    let result = match cli.command {
        Command::Serve { port, seed } => commands::run_serve(&config, port, seed).await,
        Command::Edit {
            workflow_id,
            base_url,
        } => commands::run_edit(&config, &workflow_id, base_url).await,
        Command::Validate { file } => match commands::run_validate(&file) {
            Ok(true) => Ok(()),
            Ok(false) => return ExitCode::FAILURE,
            Err(e) => Err(e.into()),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
