//! CLI module for forma
//!
//! Provides the command-line interface:
//! - import: derive schemas from a CSV catalog and save them
//! - schemas: list registered schemas
//! - validate: check a JSON value file against a schema
//! - render: create a record and print its canonical form

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{import, list_schemas, render, run_command, validate};
pub use errors::{CliError, CliResult};

/// Parses arguments and runs the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
