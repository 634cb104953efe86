//! # Output Configuration
//!
//! This module controls how command results are written: whether colour
//! is used, and how a repository's history is rendered by `dogma log`.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Print Styles
//!
//! - `simple`: one line per commit, `<revision> <summary>`
//! - `table`: aligned columns with revision, author, time and summary
//! - `json`: the commits as pretty-printed JSON

use std::env;
use std::io::Write;

use clap::ValueEnum;
use console::style;

use crate::client::Commit;
use crate::error::Result;

/// Output configuration for controlling colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always disabled.
    pub fn plain() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// How `dogma log` renders commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum PrintStyle {
    /// One line per commit
    #[default]
    Simple,
    /// Aligned columns with author and time
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Write `commits` to `out` in the requested style.
pub fn print_history(
    out: &mut dyn Write,
    commits: &[Commit],
    print_style: PrintStyle,
    config: &OutputConfig,
) -> Result<()> {
    match print_style {
        PrintStyle::Simple => {
            for commit in commits {
                writeln!(
                    out,
                    "{} {}",
                    revision_label(commit.revision, config),
                    commit.commit_message.summary
                )?;
            }
        }
        PrintStyle::Table => print_table(out, commits, config)?,
        PrintStyle::Json => {
            serde_json::to_writer_pretty(&mut *out, commits)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn print_table(out: &mut dyn Write, commits: &[Commit], config: &OutputConfig) -> Result<()> {
    const HEADERS: [&str; 4] = ["REVISION", "AUTHOR", "PUSHED AT", "SUMMARY"];

    let rows: Vec<[String; 4]> = commits
        .iter()
        .map(|c| {
            [
                c.revision.to_string(),
                c.author.name.clone(),
                c.pushed_at.clone().unwrap_or_default(),
                c.commit_message.summary.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = format_row(&HEADERS.map(String::from), &widths);
    if config.use_color {
        writeln!(out, "{}", style(header).bold())?;
    } else {
        writeln!(out, "{}", header)?;
    }
    for row in &rows {
        writeln!(out, "{}", format_row(row, &widths))?;
    }
    Ok(())
}

fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

fn revision_label(revision: i64, config: &OutputConfig) -> String {
    if config.use_color {
        style(revision).yellow().to_string()
    } else {
        revision.to_string()
    }
}
