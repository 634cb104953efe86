//! # Error Handling
//!
//! This module defines the centralized error type for the `dogma` client. It
//! uses the `thiserror` library to build one `Error` enum covering every
//! failure a single invocation can end with.
//!
//! ## Taxonomy
//!
//! - **Command-line errors** (`CommandLine`): the arguments have the wrong
//!   count or shape. These are raised before any network call is attempted
//!   and carry a usage line for the offending subcommand.
//! - **Transport errors** (`Transport`): connection failures, timeouts and
//!   body decoding failures reported by the HTTP client. They are passed
//!   through unchanged.
//! - **Unexpected status** (`UnexpectedStatus`): the server answered, but
//!   with something other than the single success code the operation
//!   expects. The error names the operation, the `/project/repo/path`
//!   target, the relevant revision markers and the numeric status.
//!
//! Local failures (reading the file to push, parsing JSON content, running
//! `$EDITOR`, parsing the server URL) are wrapped from their source error
//! types.

use thiserror::Error;

/// Main error type for dogma operations
#[derive(Error, Debug)]
pub enum Error {
    /// The arguments given to a subcommand are malformed.
    #[error("Invalid command line: {message}{}", format_usage(usage))]
    CommandLine {
        message: String,
        /// Usage line of the subcommand, when known
        usage: Option<String>,
    },

    /// The server returned a status other than the expected success code.
    #[error("failed to {operation} {target}{detail} (status: {status})")]
    UnexpectedStatus {
        operation: String,
        target: String,
        /// Revision markers, already formatted with a leading space (or empty)
        detail: String,
        status: u16,
    },

    /// A transport-level failure from the HTTP client, passed through as is.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The commit message editor could not be launched or read back.
    #[error("editor error: {0}")]
    Editor(#[from] dialoguer::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Build a command-line error without usage guidance.
    pub fn command_line(message: impl Into<String>) -> Self {
        Error::CommandLine {
            message: message.into(),
            usage: None,
        }
    }

    /// Build a command-line error that carries the usage line of a subcommand.
    pub fn usage(message: impl Into<String>, usage: &str) -> Self {
        Error::CommandLine {
            message: message.into(),
            usage: Some(usage.to_string()),
        }
    }

    /// True when the error was caused by the arguments rather than the server.
    pub fn is_command_line(&self) -> bool {
        matches!(self, Error::CommandLine { .. })
    }
}

fn format_usage(usage: &Option<String>) -> String {
    usage
        .as_ref()
        .map(|u| format!("\n  usage: {}", u))
        .unwrap_or_default()
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
