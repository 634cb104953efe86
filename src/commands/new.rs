//! # New Command Implementation
//!
//! This module implements the `new` subcommand, which creates a project or a
//! repository on the server.
//!
//! ## Functionality
//!
//! - **Project**: `dogma new foo` creates the project `foo`
//! - **Repository**: `dogma new foo/bar` creates the repository `bar` in `foo`
//!
//! Leading, trailing and repeated slashes are ignored, so `/foo/bar/` is the
//! same as `foo/bar`. A path with a third segment is rejected.

use anyhow::Result;
use clap::Args;

use dogma::command::{build_command, check_args, CommandKind};

use crate::cli::GlobalOptions;

/// Create a project or a repository
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Project (`foo`) or project and repository (`foo/bar`) to create
    #[arg(value_name = "PATH")]
    pub args: Vec<String>,
}

/// Execute the `new` command.
pub fn execute(args: NewArgs, global: &GlobalOptions) -> Result<()> {
    check_args(&CommandKind::New, &args.args)?;
    let config = global.client_config()?;
    let command = build_command(CommandKind::New, &config, &args.args)?;
    super::run(&command, &config)
}
