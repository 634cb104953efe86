//! # Log Command Implementation
//!
//! This module implements the `log` subcommand, which shows the commit history
//! of a repository, or of a single path within it.
//!
//! Without `--from` and `--to` only the most recent change is shown. With
//! `--from` alone the history is walked back to the first revision.

use anyhow::Result;
use clap::Args;

use dogma::command::{build_command, check_args, CommandKind, LogOptions};
use dogma::output::PrintStyle;

use crate::cli::GlobalOptions;

/// Show the commit history of a repository
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Repository, optionally with a path: <PROJECT>/<REPOSITORY>[/<PATH>]
    #[arg(value_name = "PATH")]
    pub args: Vec<String>,

    /// Revision to start from (e.g. -1 for the head)
    #[arg(long, value_name = "REVISION", allow_hyphen_values = true)]
    pub from: Option<String>,

    /// Revision to stop at
    #[arg(long, value_name = "REVISION", allow_hyphen_values = true)]
    pub to: Option<String>,

    /// Include every file below a directory path
    #[arg(short = 'R', long)]
    pub recursive: bool,

    /// Maximum number of commits to show (0 uses the server default)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub max_commits: u32,

    /// Output style
    #[arg(long, value_enum, default_value = "simple")]
    pub style: PrintStyle,
}

/// Execute the `log` command.
pub fn execute(args: LogArgs, global: &GlobalOptions) -> Result<()> {
    let kind = CommandKind::Log(LogOptions {
        from: args.from,
        to: args.to,
        recursive: args.recursive,
        max_commits: args.max_commits,
        style: args.style,
        output: global.output_config(),
    });
    check_args(&kind, &args.args)?;
    let config = global.client_config()?;
    let command = build_command(kind, &config, &args.args)?;
    super::run(&command, &config)
}
