//! # Dogma Client Library
//!
//! This library holds the core of the `dogma` command-line client for the
//! Central Dogma repository service. It turns command-line arguments into
//! validated requests, runs them against the service, and reports results.
//!
//! ## Quick Example
//!
//! ```
//! use dogma::command::Command;
//! use dogma::request::ClientConfig;
//!
//! let config = ClientConfig::new(Some("localhost:36462")).unwrap();
//!
//! // One segment creates a project, two create a repository
//! let command = Command::new_from_args(&config, &["foo/bar".to_string()]).unwrap();
//! assert!(matches!(command, Command::NewRepository { .. }));
//!
//! // Three segments are a command-line error
//! let err = Command::new_from_args(&config, &["foo/bar/baz".to_string()]).unwrap_err();
//! assert!(err.is_command_line());
//! ```
//!
//! ## Core Concepts
//!
//! - **Paths (`path`)**: Splits `/project/repo/path` arguments and derives
//!   remote file names for `put`.
//! - **Requests (`request`)**: The explicit client configuration and the
//!   repository addresses built from it, including default revision ranges.
//! - **Commands (`command`)**: Validates argument shapes, builds one
//!   command per invocation and executes it.
//! - **Client (`client`)**: The `DogmaClient` trait the commands call, its
//!   HTTP implementation and the wire model.
//! - **Output (`output`)**: Colour detection and history rendering.
//!
//! ## Execution Flow
//!
//! 1.  **Configure**: Build a `ClientConfig` from `--connect` and `--token`.
//! 2.  **Build**: Turn the subcommand's arguments into a `Command`. Shape
//!     errors stop here, before any request is sent.
//! 3.  **Execute**: Call the client, check the status code against the one
//!     success code the operation expects, and write the result.

pub mod client;
pub mod command;
pub mod error;
pub mod output;
pub mod path;
pub mod request;

#[cfg(test)]
mod path_proptest;
