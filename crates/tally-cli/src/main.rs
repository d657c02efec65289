//! Tally CLI - Personal income and expense tracker
//!
//! Usage:
//!   tally login NAME              Log in
//!   tally shell                   Interactive session on an in-memory store
//!   tally --db FILE list          List transactions stored in FILE
//!   tally --db FILE import --file data.json

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use tally_core::{Config, LoginState};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    let mut login = LoginState::load(&config.login_file).context("Failed to read login state")?;

    match cli.command {
        Commands::Login { name } => commands::cmd_login(&mut login, &name),
        Commands::Logout => commands::cmd_logout(&mut login),
        command => {
            commands::require_login(&login)?;
            let mut tracker = commands::open_tracker(cli.db.as_deref(), &config)?;
            commands::execute(&mut tracker, &mut login, command)
        }
    }
}
