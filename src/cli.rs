//! CLI argument parsing and command dispatch

use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use dogma::output::OutputConfig;
use dogma::request::{ClientConfig, DEFAULT_TIMEOUT};

use crate::commands;

/// Dogma - Command-line client for the Central Dogma repository service
#[derive(Parser, Debug)]
#[command(name = "dogma")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOptions,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Server to connect to (e.g. localhost:36462 or https://dogma.example.com)
    #[arg(
        short = 'c',
        long,
        global = true,
        value_name = "URL",
        env = "DOGMA_CONNECT"
    )]
    pub connect: Option<String>,

    /// Access token sent as a bearer token (defaults to "anonymous")
    #[arg(
        long,
        global = true,
        value_name = "TOKEN",
        env = "DOGMA_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Request timeout in seconds (at least 1)
    #[arg(
        long,
        global = true,
        value_name = "SECONDS",
        env = "DOGMA_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: String,
}

impl GlobalOptions {
    /// Connection settings for the repository service.
    pub fn client_config(&self) -> dogma::error::Result<ClientConfig> {
        Ok(ClientConfig::new(self.connect.as_deref())?
            .with_token(self.token.as_deref())
            .with_timeout(Duration::from_secs(self.timeout)))
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::from_env_and_flag(&self.color)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a project, or a repository inside a project
    New(commands::new::NewArgs),

    /// Put a local file into a repository
    Put(commands::put::PutArgs),

    /// Show the commit history of a repository or a path within it
    Log(commands::log::LogArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::New(args) => commands::new::execute(args, &self.global),
            Commands::Put(args) => commands::put::execute(args, &self.global),
            Commands::Log(args) => commands::log::execute(args, &self.global),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` output to stderr. `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(log_level: &str) {
    let env = env_logger::Env::default().default_filter_or(log_level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
