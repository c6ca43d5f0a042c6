pub mod check;
pub mod config;
pub mod filter;
pub mod format;
pub mod init;
pub mod preview;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::FormatArgs;
use whitespace_format::config::ConfigData;
use whitespace_format::error::{Brief, ConfigError, FormatError, EXIT_CONFIG_ERROR, EXIT_READ_ERROR};
use whitespace_format::files::{FileOutcome, FileStatus};
use whitespace_format::Formatter;

/// Display an error message with proper formatting
pub fn display_error(err: &anyhow::Error) {
    let error: &(dyn std::error::Error + 'static) = err.as_ref();
    whitespace_format::error::display_error(error);
}

/// Exit code for an error that aborted the whole command
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| {
            if let Some(error) = cause.downcast_ref::<FormatError>() {
                Some(error.exit_code())
            } else {
                cause.downcast_ref::<ConfigError>().map(|_| EXIT_CONFIG_ERROR)
            }
        })
        .unwrap_or(EXIT_READ_ERROR)
}

/// Merge the configuration file with the flags and validate the result
pub fn load_formatter(options: &FormatArgs) -> Result<(Formatter, ConfigData)> {
    let data = options.load().context("Failed to load configuration")?;
    let formatter = Formatter::new(&data.format).context("Invalid configuration")?;
    tracing::debug!(?formatter, "configuration ready");
    Ok((formatter, data))
}

/// Print one file's outcome; errors go to stderr even when quiet
pub fn print_outcome(outcome: &FileOutcome, quiet: bool) {
    let path = outcome.path.display();
    match &outcome.result {
        Ok(report) => {
            if quiet || report.status == FileStatus::Unchanged {
                return;
            }
            let (mark, verb) = match report.status {
                FileStatus::Formatted => ("✓".bright_green(), "Formatted".bright_green()),
                _ => ("✗".bright_yellow(), "Needs formatting".bright_yellow()),
            };
            println!("{} {} {}", mark, verb, path.to_string().bold());
            for change in report.changes.iter() {
                println!("    {}", change.to_string().bright_black());
            }
        }
        Err(err) => print_failure(err),
    }
}

pub fn print_failure(err: &FormatError) {
    let path = err
        .path()
        .map_or_else(|| String::from("<input>"), |path| path.display().to_string());
    eprintln!("{} {}: {}", "⚠".bright_red(), path.bold(), Brief(err));
}
