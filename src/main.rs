//! # Dogma CLI
//!
//! Binary entry point for the `dogma` command-line tool. It parses the
//! arguments with `clap`, runs the selected subcommand and turns any error
//! into a single `Error: ...` line on stderr with exit code 1. Usage errors
//! detected by `clap` itself exit with code 2.
//!
//! All request shaping and validation lives in the `dogma` library crate.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
