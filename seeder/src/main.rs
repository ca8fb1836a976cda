//! `seed-fixtures`: fills a development database with fake users and schematics.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;
use seeder::app::{conclude, run_from_env};
use seeder::cli::Cli;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILTER: &str = "info";

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Read `.env` before the subscriber so `RUST_LOG` can come from it.
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => debug!("no .env file found"),
        Err(err) => warn!(error = %err, "ignoring unreadable .env file"),
    }

    conclude(run_from_env(cli.plan()), io::stderr().lock()).map_err(Into::into)
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if let Err(err) = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }
}
