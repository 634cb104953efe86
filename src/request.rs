//! # Request Addressing
//!
//! Every repository-scoped subcommand addresses the server the same way: a
//! remote URL plus a `/project/repo/path` target, optionally pinned to a
//! revision or to a `from`/`to` revision range. This module builds those
//! addresses from an explicit [`ClientConfig`] and the raw path argument.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::path::split_path;

/// Revision the history walk starts from when no range is given (head).
pub const DEFAULT_FROM_REVISION: &str = "-1";

/// Revision the history walk stops at when no `--to` is given.
pub const DEFAULT_TO_REVISION: &str = "1";

/// Token sent when the user does not supply one.
pub const DEFAULT_TOKEN: &str = "anonymous";

/// Default timeout applied to every HTTP request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings shared by every subcommand of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Normalized base URL of the server, always ending with `/`.
    pub remote_url: String,
    /// Bearer token sent with each request.
    pub token: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a configuration from the global `--connect` value.
    pub fn new(connect: Option<&str>) -> Result<Self> {
        Ok(Self {
            remote_url: get_remote_url(connect)?,
            token: DEFAULT_TOKEN.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replace the bearer token. Blank tokens keep the default.
    pub fn with_token(mut self, token: Option<&str>) -> Self {
        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            self.token = token.to_string();
        }
        self
    }

    /// Replace the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Normalize the `--connect` value into a base URL.
///
/// A bare `host:port` gets an `http://` scheme. Only `http` and `https` are
/// accepted. The returned URL always ends with `/`.
pub fn get_remote_url(connect: Option<&str>) -> Result<String> {
    let connect = connect.map(str::trim).unwrap_or_default();
    if connect.is_empty() {
        return Err(Error::command_line(
            "no server given; pass --connect <URL> or set DOGMA_CONNECT",
        ));
    }

    let with_scheme = if connect.contains("://") {
        connect.to_string()
    } else {
        format!("http://{}", connect)
    };

    let mut url = Url::parse(&with_scheme)?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::command_line(format!(
                "unsupported scheme '{}' in {}; use http or https",
                other, connect
            )))
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::command_line(format!("no host in {}", connect)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url.to_string())
}

/// Address of a single repository, optionally pinned to a revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRequestInfo {
    pub remote_url: String,
    pub proj_name: String,
    pub repo_name: String,
    /// In-repository path, always starting with `/`.
    pub path: String,
    /// Revision to operate on. Empty means the server default.
    pub revision: String,
}

impl RepositoryRequestInfo {
    /// Resolve `path_arg` against the server in `config`.
    ///
    /// The path must name at least a project and a repository. Without a
    /// third segment the path defaults to the repository root `/`.
    pub fn new(config: &ClientConfig, path_arg: &str, revision: Option<&str>) -> Result<Self> {
        let mut segments = split_path(path_arg).unwrap_or_default().into_iter();
        let (proj_name, repo_name) = match (segments.next(), segments.next()) {
            (Some(proj), Some(repo)) => (proj, repo),
            _ => {
                return Err(Error::command_line(format!(
                    "'{}' does not name a repository; expected /<project>/<repository>[/<path>]",
                    path_arg
                )))
            }
        };
        let path = segments.next().unwrap_or_else(|| "/".to_string());

        Ok(Self {
            remote_url: config.remote_url.clone(),
            proj_name,
            repo_name,
            path,
            revision: revision.unwrap_or_default().to_string(),
        })
    }

    /// Full `/project/repo/path` target, as shown to the user.
    pub fn target(&self) -> String {
        format!("/{}/{}{}", self.proj_name, self.repo_name, self.path)
    }
}

/// Address of a repository plus a `from`/`to` revision range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRequestInfoWithFromTo {
    pub remote_url: String,
    pub proj_name: String,
    pub repo_name: String,
    pub path: String,
    pub from: String,
    pub to: String,
}

impl RepositoryRequestInfoWithFromTo {
    /// Resolve `path_arg` and apply the default revision range.
    ///
    /// Without `from` and `to` the range covers the most recent change only
    /// (`-1` to `1`). A lone `from` walks back to revision `1`. A lone `to`
    /// leaves `from` empty so the server picks its own starting point.
    pub fn new(
        config: &ClientConfig,
        path_arg: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self> {
        let repo = RepositoryRequestInfo::new(config, path_arg, None)?;
        let (from, to) = default_range(from, to);

        Ok(Self {
            remote_url: repo.remote_url,
            proj_name: repo.proj_name,
            repo_name: repo.repo_name,
            path: repo.path,
            from,
            to,
        })
    }

    /// Full `/project/repo/path` target, as shown to the user.
    pub fn target(&self) -> String {
        format!("/{}/{}{}", self.proj_name, self.repo_name, self.path)
    }
}

fn default_range(from: Option<&str>, to: Option<&str>) -> (String, String) {
    let from = from.unwrap_or_default();
    let to = to.unwrap_or_default();
    match (from.is_empty(), to.is_empty()) {
        (true, true) => (
            DEFAULT_FROM_REVISION.to_string(),
            DEFAULT_TO_REVISION.to_string(),
        ),
        (false, true) => (from.to_string(), DEFAULT_TO_REVISION.to_string()),
        _ => (from.to_string(), to.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new(Some("localhost:36462")).unwrap()
    }

    #[test]
    fn test_get_remote_url_adds_scheme_and_slash() {
        assert_eq!(
            get_remote_url(Some("localhost:36462")).unwrap(),
            "http://localhost:36462/"
        );
        assert_eq!(
            get_remote_url(Some("https://dogma.example.com")).unwrap(),
            "https://dogma.example.com/"
        );
        assert_eq!(
            get_remote_url(Some("http://dogma.example.com/base")).unwrap(),
            "http://dogma.example.com/base/"
        );
    }

    #[test]
    fn test_get_remote_url_missing_is_command_line_error() {
        assert!(get_remote_url(None).unwrap_err().is_command_line());
        assert!(get_remote_url(Some("   ")).unwrap_err().is_command_line());
    }

    #[test]
    fn test_get_remote_url_rejects_bad_urls() {
        assert!(get_remote_url(Some("ftp://dogma.example.com")).is_err());
        assert!(matches!(
            get_remote_url(Some("http://[::1")),
            Err(Error::UrlParse(_))
        ));
    }

    #[test]
    fn test_client_config_token() {
        let config = config();
        assert_eq!(config.token, DEFAULT_TOKEN);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        let config = config.with_token(Some("secret"));
        assert_eq!(config.token, "secret");

        let config = config.with_token(Some("  "));
        assert_eq!(config.token, "secret");
    }

    #[test]
    fn test_request_info_with_file_path() {
        let repo = RepositoryRequestInfo::new(&config(), "/foo/bar/a/b.json", Some("3")).unwrap();
        assert_eq!(repo.remote_url, "http://localhost:36462/");
        assert_eq!(repo.proj_name, "foo");
        assert_eq!(repo.repo_name, "bar");
        assert_eq!(repo.path, "/a/b.json");
        assert_eq!(repo.revision, "3");
        assert_eq!(repo.target(), "/foo/bar/a/b.json");
    }

    #[test]
    fn test_request_info_defaults_to_root_path() {
        let repo = RepositoryRequestInfo::new(&config(), "foo/bar/", None).unwrap();
        assert_eq!(repo.path, "/");
        assert_eq!(repo.revision, "");
        assert_eq!(repo.target(), "/foo/bar/");
    }

    #[test]
    fn test_request_info_requires_project_and_repo() {
        for path in ["", "/", "foo", "/foo/"] {
            let err = RepositoryRequestInfo::new(&config(), path, None).unwrap_err();
            assert!(err.is_command_line(), "{:?} should be rejected", path);
        }
    }

    #[test]
    fn test_from_to_defaults() {
        let repo = RepositoryRequestInfoWithFromTo::new(&config(), "/foo/bar", None, None).unwrap();
        assert_eq!(repo.from, "-1");
        assert_eq!(repo.to, "1");

        let repo =
            RepositoryRequestInfoWithFromTo::new(&config(), "/foo/bar", Some("5"), None).unwrap();
        assert_eq!(repo.from, "5");
        assert_eq!(repo.to, "1");

        let repo =
            RepositoryRequestInfoWithFromTo::new(&config(), "/foo/bar", Some("5"), Some("2"))
                .unwrap();
        assert_eq!(repo.from, "5");
        assert_eq!(repo.to, "2");
    }

    #[test]
    fn test_from_to_only_to_leaves_from_empty() {
        let repo =
            RepositoryRequestInfoWithFromTo::new(&config(), "/foo/bar", None, Some("3")).unwrap();
        assert_eq!(repo.from, "");
        assert_eq!(repo.to, "3");
    }

    #[test]
    fn test_from_to_empty_strings_count_as_absent() {
        let repo =
            RepositoryRequestInfoWithFromTo::new(&config(), "/foo/bar/a.txt", Some(""), Some(""))
                .unwrap();
        assert_eq!((repo.from.as_str(), repo.to.as_str()), ("-1", "1"));
        assert_eq!(repo.target(), "/foo/bar/a.txt");
    }
}
