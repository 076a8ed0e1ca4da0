mod backend;
mod cli;
mod frontend;
mod repl;
mod script;

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{directive_for_verbosity, Cli};
use crate::repl::SessionOptions;

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        // stdout belongs to results, keep logs plain and out of the way
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.file {
        Some(path) => {
            let failures = script::run_file(path, cli.report)?;

            if failures > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }

        None => repl::run(&SessionOptions::from(&cli))?,
    }

    Ok(ExitCode::SUCCESS)
}
