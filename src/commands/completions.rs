//! # Completions Command Implementation
//!
//! Prints a shell completion script for `dogma` to stdout.
//!
//! ```bash
//! dogma completions bash > ~/.local/share/bash-completion/completions/dogma
//! dogma completions zsh > ~/.zfunc/_dogma
//! dogma completions fish > ~/.config/fish/completions/dogma.fish
//! ```

use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for (bash, zsh, fish, powershell, elvish)
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, bin_name, &mut io::stdout());
    Ok(())
}
