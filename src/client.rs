//! # Repository Service Client
//!
//! The commands talk to the server through the [`DogmaClient`] trait. Each
//! operation returns the value together with the HTTP status code, leaving
//! the decision about which status counts as success to the caller.
//! Transport failures are returned as [`crate::error::Error::Transport`].
//!
//! [`HttpDogmaClient`] implements the trait over the Central Dogma REST API
//! (`/api/v1/...`) with a blocking `reqwest` client.
//!
//! The wire model used by the API lives here as well: projects,
//! repositories, commits, commit messages and the upsert [`Change`] sent by
//! a push.

use std::fs;
use std::path::Path;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use crate::error::Result;
use crate::request::ClientConfig;

/// A project as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A repository as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub head_revision: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Outcome of a successful push.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushResult {
    pub revision: i64,
    #[serde(default)]
    pub pushed_at: Option<String>,
}

/// Author of a commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Summary line plus optional long description of a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    pub summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

impl CommitMessage {
    pub fn new(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

/// One entry of a repository's history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub revision: i64,
    #[serde(default)]
    pub author: Author,
    #[serde(default)]
    pub commit_message: CommitMessage,
    #[serde(default)]
    pub pushed_at: Option<String>,
}

/// Kind of content carried by an upsert change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    UpsertJson,
    UpsertText,
}

/// Create-or-replace instruction for one file, sent as part of a push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub path: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub content: Value,
}

impl Change {
    /// Read `local_file` and wrap it as an upsert of `remote_path`.
    ///
    /// Remote paths ending in `.json` are sent as parsed JSON, anything else
    /// as UTF-8 text.
    pub fn upsert_from_file(local_file: &Path, remote_path: &str) -> Result<Self> {
        let bytes = fs::read(local_file)?;
        if remote_path.to_ascii_lowercase().ends_with(".json") {
            let content: Value = serde_json::from_slice(&bytes)?;
            Ok(Self {
                path: remote_path.to_string(),
                change_type: ChangeType::UpsertJson,
                content,
            })
        } else {
            let text = String::from_utf8(bytes)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            Ok(Self {
                path: remote_path.to_string(),
                change_type: ChangeType::UpsertText,
                content: Value::String(text),
            })
        }
    }
}

/// Operations the commands need from the repository service.
///
/// Every call yields the body and the HTTP status. The body is only decoded
/// when the status is the one the operation succeeds with (`201 Created` for
/// creations, `200 OK` otherwise). Any other status comes back with a default
/// value, so a stray 2xx with an odd body still surfaces as a status error.
pub trait DogmaClient {
    fn create_project(&self, name: &str) -> Result<(Project, u16)>;

    fn create_repository(&self, project: &str, repo: &str) -> Result<(Repository, u16)>;

    fn push(
        &self,
        project: &str,
        repo: &str,
        revision: &str,
        message: &CommitMessage,
        changes: &[Change],
    ) -> Result<(PushResult, u16)>;

    /// Commits touching `path` between `from` and `to`. `max_commits == 0`
    /// leaves the limit to the server.
    fn get_history(
        &self,
        project: &str,
        repo: &str,
        from: &str,
        to: &str,
        path: &str,
        max_commits: u32,
    ) -> Result<(Vec<Commit>, u16)>;
}

/// [`DogmaClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDogmaClient {
    client: Client,
    base: Url,
    token: String,
}

impl HttpDogmaClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("dogma/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base: Url::parse(&config.remote_url)?,
            token: config.token.clone(),
        })
    }

    /// `{base}api/v1/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v1"]).extend(segments);
        }
        url
    }

    /// Send `request` and decode the body only if the server answered with
    /// `expected`.
    fn send<T>(&self, request: RequestBuilder, expected: StatusCode) -> Result<(T, u16)>
    where
        T: DeserializeOwned + Default,
    {
        let response = request.bearer_auth(&self.token).send()?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());
        if status == expected {
            Ok((response.json()?, status.as_u16()))
        } else {
            Ok((T::default(), status.as_u16()))
        }
    }
}

/// History responses hold a list of commits, or a single commit when the
/// range covers one revision.
#[derive(Deserialize)]
#[serde(untagged)]
enum CommitsBody {
    Many(Vec<Commit>),
    One(Commit),
}

impl Default for CommitsBody {
    fn default() -> Self {
        CommitsBody::Many(Vec::new())
    }
}

impl From<CommitsBody> for Vec<Commit> {
    fn from(body: CommitsBody) -> Self {
        match body {
            CommitsBody::Many(commits) => commits,
            CommitsBody::One(commit) => vec![commit],
        }
    }
}

impl DogmaClient for HttpDogmaClient {
    fn create_project(&self, name: &str) -> Result<(Project, u16)> {
        let url = self.endpoint(&["projects"]);
        debug!("POST {}", url);
        let request = self.client.post(url).json(&json!({ "name": name }));
        self.send(request, StatusCode::CREATED)
    }

    fn create_repository(&self, project: &str, repo: &str) -> Result<(Repository, u16)> {
        let url = self.endpoint(&["projects", project, "repos"]);
        debug!("POST {}", url);
        let request = self.client.post(url).json(&json!({ "name": repo }));
        self.send(request, StatusCode::CREATED)
    }

    fn push(
        &self,
        project: &str,
        repo: &str,
        revision: &str,
        message: &CommitMessage,
        changes: &[Change],
    ) -> Result<(PushResult, u16)> {
        let mut url = self.endpoint(&["projects", project, "repos", repo, "contents"]);
        if !revision.is_empty() {
            url.query_pairs_mut().append_pair("revision", revision);
        }
        debug!("POST {} ({} change(s))", url, changes.len());
        let body = json!({ "commitMessage": message, "changes": changes });
        self.send(self.client.post(url).json(&body), StatusCode::OK)
    }

    fn get_history(
        &self,
        project: &str,
        repo: &str,
        from: &str,
        to: &str,
        path: &str,
        max_commits: u32,
    ) -> Result<(Vec<Commit>, u16)> {
        let mut segments = vec!["projects", project, "repos", repo, "commits"];
        if !from.is_empty() {
            segments.push(from);
        }
        let mut url = self.endpoint(&segments);
        {
            let mut query = url.query_pairs_mut();
            if !to.is_empty() {
                query.append_pair("to", to);
            }
            if !path.is_empty() {
                query.append_pair("path", path);
            }
            if max_commits > 0 {
                query.append_pair("maxCommits", &max_commits.to_string());
            }
        }
        debug!("GET {}", url);
        let (body, status): (CommitsBody, u16) = self.send(self.client.get(url), StatusCode::OK)?;
        Ok((body.into(), status))
    }
}
