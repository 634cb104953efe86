//! # Commands
//!
//! A [`Command`] is one fully-validated unit of work: create a project,
//! create a repository, put a file or show history. Commands are built from
//! the positional arguments and flags of a subcommand, then executed once
//! against a [`DogmaClient`], writing a confirmation line (or the rendered
//! history) to an output sink.
//!
//! Building a command never touches the network. Argument-shape problems
//! are reported as [`Error::CommandLine`] with the usage line of the
//! subcommand. [`check_args`] runs the same checks without a
//! [`ClientConfig`], so a caller can reject bad arguments before it even
//! resolves the server.

use std::io::Write;
use std::path::PathBuf;

use log::{debug, warn};
use reqwest::StatusCode;

use crate::client::{Change, CommitMessage, DogmaClient};
use crate::error::{Error, Result};
use crate::output::{print_history, OutputConfig, PrintStyle};
use crate::path::{recursive_pattern, resolve_put_path, split_path};
use crate::request::{ClientConfig, RepositoryRequestInfo, RepositoryRequestInfoWithFromTo};

pub const NEW_USAGE: &str = "dogma new <PROJECT>[/<REPOSITORY>]";
pub const PUT_USAGE: &str = "dogma put <PROJECT>/<REPOSITORY>[/<PATH>] <FILE>";
pub const LOG_USAGE: &str = "dogma log <PROJECT>/<REPOSITORY>[/<PATH>]";

/// Where the commit message of a put comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommitMessageSource {
    /// `Add <local file>` with no detail.
    #[default]
    Generated,
    /// Summary (and optional detail) given on the command line.
    Given { summary: String, detail: String },
    /// Ask the user through `$EDITOR`.
    Editor,
}

impl CommitMessageSource {
    /// Pick the source from the `--message`, `--detail` and `--edit` flags.
    ///
    /// An explicit summary wins over `--edit`. A detail without a summary
    /// gets the generated summary.
    pub fn from_flags(summary: Option<String>, detail: Option<String>, edit: bool) -> Self {
        let summary = summary.filter(|s| !s.trim().is_empty());
        match (summary, detail) {
            (Some(summary), detail) => CommitMessageSource::Given {
                summary,
                detail: detail.unwrap_or_default(),
            },
            (None, _) if edit => CommitMessageSource::Editor,
            (None, Some(detail)) => CommitMessageSource::Given {
                summary: String::new(),
                detail,
            },
            (None, None) => CommitMessageSource::Generated,
        }
    }

    /// Produce the message for a put of the local file `path`.
    pub fn resolve(&self, path: &str) -> Result<CommitMessage> {
        match self {
            CommitMessageSource::Generated => Ok(CommitMessage::new(default_summary(path), "")),
            CommitMessageSource::Given { summary, detail } if summary.is_empty() => {
                Ok(CommitMessage::new(default_summary(path), detail.clone()))
            }
            CommitMessageSource::Given { summary, detail } => {
                Ok(CommitMessage::new(summary.clone(), detail.clone()))
            }
            CommitMessageSource::Editor => {
                let template = format!(
                    "\n# Enter the commit message for {}.\n\
                     # The first line is the summary, the rest is the detail.\n\
                     # Lines starting with '#' are ignored. An empty message aborts the put.\n",
                    path
                );
                let text = dialoguer::Editor::new().edit(&template)?;
                text.as_deref()
                    .and_then(parse_commit_message)
                    .ok_or_else(|| Error::command_line("aborting put due to empty commit message"))
            }
        }
    }
}

fn default_summary(path: &str) -> String {
    format!("Add {}", path)
}

/// Split editor text into summary and detail, ignoring `#` comment lines.
///
/// Returns `None` when nothing but comments and blank lines remain.
pub fn parse_commit_message(text: &str) -> Option<CommitMessage> {
    let mut lines = text
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .skip_while(|line| line.trim().is_empty());

    let summary = lines.next()?.trim().to_string();
    let detail = lines.collect::<Vec<_>>().join("\n").trim().to_string();
    Some(CommitMessage::new(summary, detail))
}

/// Flags of `dogma put`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutOptions {
    pub revision: Option<String>,
    pub message: CommitMessageSource,
}

/// Flags of `dogma log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    pub from: Option<String>,
    pub to: Option<String>,
    /// Include every file below a directory path.
    pub recursive: bool,
    /// Upper bound on returned commits. Zero leaves it to the server.
    pub max_commits: u32,
    pub style: PrintStyle,
    pub output: OutputConfig,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            recursive: false,
            max_commits: 0,
            style: PrintStyle::default(),
            output: OutputConfig::plain(),
        }
    }
}

/// Subcommand selector for [`build_command`].
#[derive(Debug, Clone)]
pub enum CommandKind {
    New,
    Put(PutOptions),
    Log(LogOptions),
}

/// A validated command, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewProject {
        remote_url: String,
        name: String,
    },
    NewRepository {
        remote_url: String,
        proj_name: String,
        repo_name: String,
    },
    /// Puts `local_file` at `repo.path`. A directory path has already been
    /// completed with the local file name.
    PutFile {
        repo: RepositoryRequestInfo,
        local_file: PathBuf,
        message: CommitMessageSource,
    },
    Log {
        repo: RepositoryRequestInfoWithFromTo,
        max_commits: u32,
        style: PrintStyle,
        output: OutputConfig,
    },
}

/// Validate the count and shape of the positional arguments of `kind`.
///
/// Needs no server, so it can run before the connection settings are
/// resolved. [`build_command`] applies the same checks.
pub fn check_args(kind: &CommandKind, args: &[String]) -> Result<()> {
    match kind {
        CommandKind::New => check_new_args(args),
        CommandKind::Put(_) => check_put_args(args),
        CommandKind::Log(_) => check_log_args(args),
    }
}

/// Build the command for `kind` from its positional arguments.
pub fn build_command(
    kind: CommandKind,
    config: &ClientConfig,
    args: &[String],
) -> Result<Command> {
    match kind {
        CommandKind::New => Command::new_from_args(config, args),
        CommandKind::Put(options) => Command::put_from_args(config, args, options),
        CommandKind::Log(options) => Command::log_from_args(config, args, options),
    }
}

fn expect_args(args: &[String], count: usize, usage: &str) -> Result<()> {
    if args.len() != count {
        return Err(Error::usage(
            format!("expected {} argument(s), got {}", count, args.len()),
            usage,
        ));
    }
    Ok(())
}

fn expect_repository(path_arg: &str, usage: &str) -> Result<()> {
    if split_path(path_arg).map_or(0, |segments| segments.len()) < 2 {
        return Err(Error::usage(
            format!(
                "'{}' does not name a repository; expected /<project>/<repository>[/<path>]",
                path_arg
            ),
            usage,
        ));
    }
    Ok(())
}

fn check_new_args(args: &[String]) -> Result<()> {
    expect_args(args, 1, NEW_USAGE)?;
    match split_path(&args[0]).map_or(0, |segments| segments.len()) {
        1 | 2 => Ok(()),
        _ => Err(Error::usage(
            format!("'{}' must name a project or a project/repository", args[0]),
            NEW_USAGE,
        )),
    }
}

fn check_put_args(args: &[String]) -> Result<()> {
    expect_args(args, 2, PUT_USAGE)?;
    if args[1].is_empty() {
        return Err(Error::usage("the local file name is empty", PUT_USAGE));
    }
    expect_repository(&args[0], PUT_USAGE)
}

fn check_log_args(args: &[String]) -> Result<()> {
    if args.len() > 1 {
        return Err(Error::usage(
            format!("expected at most 1 argument, got {}", args.len()),
            LOG_USAGE,
        ));
    }
    expect_repository(args.first().map(String::as_str).unwrap_or_default(), LOG_USAGE)
}

impl Command {
    /// `new <path>`: a project for one segment, a repository for two.
    pub fn new_from_args(config: &ClientConfig, args: &[String]) -> Result<Self> {
        check_new_args(args)?;

        let segments = split_path(&args[0]).unwrap_or_default();
        match <[String; 2]>::try_from(segments) {
            Ok([proj_name, repo_name]) => Ok(Command::NewRepository {
                remote_url: config.remote_url.clone(),
                proj_name,
                repo_name,
            }),
            Err(segments) if segments.len() == 1 => Ok(Command::NewProject {
                remote_url: config.remote_url.clone(),
                name: segments.into_iter().next().unwrap_or_default(),
            }),
            Err(_) => Err(Error::usage(
                format!("'{}' must name a project or a project/repository", args[0]),
                NEW_USAGE,
            )),
        }
    }

    /// `put <path> <localFile>`.
    pub fn put_from_args(
        config: &ClientConfig,
        args: &[String],
        options: PutOptions,
    ) -> Result<Self> {
        check_put_args(args)?;

        let local_file = &args[1];
        let mut repo = RepositoryRequestInfo::new(config, &args[0], options.revision.as_deref())?;
        repo.path = resolve_put_path(&repo.path, local_file);

        Ok(Command::PutFile {
            repo,
            local_file: PathBuf::from(local_file),
            message: options.message,
        })
    }

    /// `log [path]`.
    pub fn log_from_args(
        config: &ClientConfig,
        args: &[String],
        options: LogOptions,
    ) -> Result<Self> {
        check_log_args(args)?;

        let mut repo = RepositoryRequestInfoWithFromTo::new(
            config,
            &args[0],
            options.from.as_deref(),
            options.to.as_deref(),
        )?;
        if options.recursive {
            repo.path = recursive_pattern(&repo.path);
        }

        Ok(Command::Log {
            repo,
            max_commits: options.max_commits,
            style: options.style,
            output: options.output,
        })
    }

    /// Run the command against `client`, reporting to `out`.
    pub fn execute(&self, client: &dyn DogmaClient, out: &mut dyn Write) -> Result<()> {
        match self {
            Command::NewProject { remote_url, name } => {
                debug!("creating project {} on {}", name, remote_url);
                let (_, status) = client.create_project(name)?;
                let target = format!("/{}", name);
                expect_status(status, StatusCode::CREATED, "create", &target, String::new())?;
                writeln!(out, "Created: {}", target)?;
            }
            Command::NewRepository {
                remote_url,
                proj_name,
                repo_name,
            } => {
                debug!("creating repository {}/{} on {}", proj_name, repo_name, remote_url);
                let (_, status) = client.create_repository(proj_name, repo_name)?;
                let target = format!("/{}/{}", proj_name, repo_name);
                expect_status(status, StatusCode::CREATED, "create", &target, String::new())?;
                writeln!(out, "Created: {}", target)?;
            }
            Command::PutFile {
                repo,
                local_file,
                message,
            } => {
                let change = Change::upsert_from_file(local_file, &repo.path)?;
                let message = message.resolve(&local_file.display().to_string())?;
                debug!("pushing {} as {:?}", local_file.display(), change.change_type);

                let (result, status) = client.push(
                    &repo.proj_name,
                    &repo.repo_name,
                    &repo.revision,
                    &message,
                    std::slice::from_ref(&change),
                )?;
                expect_status(
                    status,
                    StatusCode::OK,
                    &format!("put {} to", local_file.display()),
                    &repo.target(),
                    format!(" revision: {:?}", repo.revision),
                )?;
                debug!("pushed revision {}", result.revision);
                writeln!(out, "Put: {}", repo.target())?;
            }
            Command::Log {
                repo,
                max_commits,
                style,
                output,
            } => {
                let (commits, status) = client.get_history(
                    &repo.proj_name,
                    &repo.repo_name,
                    &repo.from,
                    &repo.to,
                    &repo.path,
                    *max_commits,
                )?;
                expect_status(
                    status,
                    StatusCode::OK,
                    "get the commit logs of",
                    &repo.target(),
                    format!(" from: {:?}, to: {:?}", repo.from, repo.to),
                )?;
                print_history(out, &commits, *style, output)?;
            }
        }
        Ok(())
    }
}

fn expect_status(
    status: u16,
    expected: StatusCode,
    operation: &str,
    target: &str,
    detail: String,
) -> Result<()> {
    if status == expected.as_u16() {
        return Ok(());
    }
    warn!("{} {}: expected {}, got {}", operation, target, expected.as_u16(), status);
    Err(Error::UnexpectedStatus {
        operation: operation.to_string(),
        target: target.to_string(),
        detail,
        status,
    })
}
