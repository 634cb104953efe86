//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `dogma`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the global
//!   options, builds a `dogma::command::Command` and runs it.
//!
//! Positional arguments are collected as a list and validated by the
//! library, so argument-shape errors carry the same usage line whether the
//! command is driven from here or from another caller.

use std::io;

use anyhow::Result;

use dogma::client::HttpDogmaClient;
use dogma::command::Command;
use dogma::request::ClientConfig;

pub mod completions;
pub mod log;
pub mod new;
pub mod put;

/// Run a built command against the configured server, writing to stdout.
pub fn run(command: &Command, config: &ClientConfig) -> Result<()> {
    let client = HttpDogmaClient::new(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    command.execute(&client, &mut out)?;
    Ok(())
}
