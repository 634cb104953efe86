//! # Put Command Implementation
//!
//! This module implements the `put` subcommand, which pushes a local file to
//! a path inside a repository as a single commit.
//!
//! ## Remote Path
//!
//! - `dogma put foo/bar a/app.yaml` puts the file at `/app.yaml`
//! - `dogma put foo/bar/configs/ a/app.yaml` puts it at `/configs/app.yaml`
//! - `dogma put foo/bar/configs/main.yaml a/app.yaml` puts it at `/configs/main.yaml`
//!
//! ## Commit Message
//!
//! The summary comes from `--message`, or from `$EDITOR` with `--edit`, or
//! defaults to `Add <FILE>`, naming the local file as given on the command
//! line (not the remote path). `--detail` supplies the long description.

use anyhow::Result;
use clap::Args;

use dogma::command::{build_command, check_args, CommandKind, CommitMessageSource, PutOptions};

use crate::cli::GlobalOptions;

/// Put a local file into a repository
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Remote path followed by the local file: <PROJECT>/<REPOSITORY>[/<PATH>] <FILE>
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Revision the change is based on (defaults to the head revision)
    #[arg(short, long, value_name = "REVISION", allow_hyphen_values = true)]
    pub revision: Option<String>,

    /// Commit summary
    #[arg(short, long, value_name = "SUMMARY")]
    pub message: Option<String>,

    /// Long description of the commit
    #[arg(long, value_name = "DETAIL")]
    pub detail: Option<String>,

    /// Write the commit message in $EDITOR
    #[arg(short, long, conflicts_with = "message")]
    pub edit: bool,
}

/// Execute the `put` command.
pub fn execute(args: PutArgs, global: &GlobalOptions) -> Result<()> {
    let kind = CommandKind::Put(PutOptions {
        revision: args.revision,
        message: CommitMessageSource::from_flags(args.message, args.detail, args.edit),
    });
    check_args(&kind, &args.args)?;
    let config = global.client_config()?;
    let command = build_command(kind, &config, &args.args)?;
    super::run(&command, &config)
}
