//! rTaskflow library root.
//! Exposes the CLI parser, the high-level run() function and the client core
//! (API client, session, pagination, visibility, statistics, controllers).

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands::{self, Context};
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: Config) -> AppResult<()> {
    if let Commands::Config { .. } = &cli.command {
        return commands::config::handle(&cli.command, &cfg);
    }

    let mut ctx = Context::new(cfg, cli.api_url.as_deref())?;
    match &cli.command {
        Commands::Login { .. } => commands::login::handle(&cli.command, &mut ctx).await,
        Commands::Logout => commands::logout::handle(&mut ctx),
        Commands::Whoami => commands::whoami::handle(&mut ctx).await,
        Commands::Open { .. } => commands::open::handle(&cli.command, &mut ctx).await,
        Commands::Home => commands::home::handle(&mut ctx).await,
        Commands::Profile => commands::profile::handle(&mut ctx).await,
        Commands::Employees { .. } => commands::employees::handle(&cli.command, &mut ctx).await,
        Commands::Vacations { .. } => commands::vacations::handle(&cli.command, &mut ctx).await,
        Commands::Export { .. } => commands::export::handle(&cli.command, &mut ctx).await,
        Commands::Config { .. } => Ok(()),
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load configuration once
    let cfg = Config::load()?;
    logging::init(cli.verbose, &cfg.log_level);

    dispatch(&cli, cfg).await
}
