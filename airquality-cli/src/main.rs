//! Binary crate for the `airquality` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Loading `.env` and setting up logging
//! - Interactive configuration

use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let cmd = cli::Cli::parse();
    init_logging(cmd.log_level);

    if let Some(e) = dotenv_problem(dotenv) {
        tracing::warn!(error = %e, "ignoring unreadable .env file");
    }

    cmd.run().await
}

/// A missing .env is fine; the key may come from the environment or config file.
fn dotenv_problem<T>(loaded: Result<T, dotenvy::Error>) -> Option<dotenvy::Error> {
    match loaded {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

/// Logs go to stderr so stdout carries only the report.
fn init_logging(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
