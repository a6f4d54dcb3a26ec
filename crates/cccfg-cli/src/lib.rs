//! Command-line frontend for the cccfg profile store.

pub mod cli_args;
pub mod commands;
pub mod launcher;

use clap::Parser;

/// Parse the process arguments and run the selected command.
pub fn run() -> Result<(), String> {
    let cli = cli_args::Cli::parse();
    commands::dispatch(cli)
}
