//! Shared test utilities for E2E tests.
//!
//! This module provides a one-shot HTTP server standing in for a Central
//! Dogma server, plus helpers to build `dogma` commands that talk to it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let server = MockServer::respond(201, r#"{"name":"foo"}"#);
//!     server.command().args(["new", "foo"]).assert().success();
//!     assert!(server.request().starts_with("POST /api/v1/projects "));
//! }
//! ```

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{closed_port_url, dogma, offline, MockServer};
}

/// A `dogma` command with the connection environment cleared.
pub fn dogma() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dogma");
    cmd.env_remove("DOGMA_CONNECT")
        .env_remove("DOGMA_TOKEN")
        .env_remove("DOGMA_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// A `dogma` command pointed at a server that refuses connections.
#[allow(dead_code)]
pub fn offline() -> assert_cmd::Command {
    let mut cmd = dogma();
    cmd.arg("--connect").arg(closed_port_url());
    cmd
}

/// Address of a local port nothing listens on.
#[allow(dead_code)]
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read address");
    drop(listener);
    format!("http://{}", addr)
}

/// Serves exactly one canned HTTP response and records the request.
pub struct MockServer {
    addr: SocketAddr,
    handle: Option<JoinHandle<String>>,
}

impl MockServer {
    /// Start a server answering the next request with `status` and `body`.
    pub fn respond(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to read address");
        let body = body.to_string();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("No connection");
            let mut reader = BufReader::new(stream);
            let mut request = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("Failed to read request");
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().expect("Bad content length");
                }
                request.push_str(&line);
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut payload = vec![0u8; content_length];
            reader.read_exact(&mut payload).expect("Failed to read body");
            request.push_str(&String::from_utf8_lossy(&payload));

            let response = format!(
                "HTTP/1.1 {} X\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            reader
                .get_mut()
                .write_all(response.as_bytes())
                .expect("Failed to write response");
            request
        });

        Self {
            addr,
            handle: Some(handle),
        }
    }

    /// Base URL of the server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A `dogma` command already pointed at this server.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = dogma();
        cmd.arg("--connect").arg(self.url());
        cmd
    }

    /// Wait for the request and return it (request line, headers and body).
    pub fn request(mut self) -> String {
        self.handle
            .take()
            .expect("request already taken")
            .join()
            .expect("Server thread panicked")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_port_url_is_http() {
        assert!(closed_port_url().starts_with("http://127.0.0.1:"));
    }
}
