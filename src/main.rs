mod cli;
mod commands;

pub use cli::*;
pub use commands::*;
pub use ddsref::catalog::*;
pub use ddsref::domain::constants::*;
pub use ddsref::domain::models::*;
pub use ddsref::services::config::*;
pub use ddsref::services::consistency::*;
pub use ddsref::services::output::*;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // stderr only; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(Outcome::Found) => ExitCode::SUCCESS,
        Ok(Outcome::Missing) => ExitCode::from(EXIT_NOT_FOUND),
        Err(e) => {
            print_error(cli.json, &e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Outcome> {
    let config = load_config()?;
    let catalog = load_catalog(cli.source.as_deref(), &config)?;

    if let Some(outcome) = handle_admin_commands(cli, &catalog)? {
        return Ok(outcome);
    }
    handle_runtime_commands(cli, &catalog)
}
