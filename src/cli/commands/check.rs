use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{load_formatter, print_failure, print_outcome};
use crate::cli::FormatArgs;
use whitespace_format::error::{Brief, FormatError};
use whitespace_format::files::{self, FileOutcome, FileReport, FileSelector, Mode, Summary};

#[derive(Serialize)]
struct JsonEntry<'a> {
    path: &'a Path,
    #[serde(flatten)]
    report: Option<&'a FileReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    files: Vec<JsonEntry<'a>>,
    summary: Summary,
}

/// One entry per input that could not be listed, then one per checked file
fn json_entries<'a>(
    outcomes: &'a [FileOutcome],
    selection_errors: &'a [FormatError],
) -> Vec<JsonEntry<'a>> {
    let failed_inputs = selection_errors.iter().map(|err| JsonEntry {
        path: err.path().unwrap_or_else(|| Path::new("<input>")),
        report: None,
        error: Some(Brief(err).to_string()),
    });
    let checked = outcomes.iter().map(|outcome| match &outcome.result {
        Ok(report) => JsonEntry {
            path: &outcome.path,
            report: Some(report),
            error: None,
        },
        Err(err) => JsonEntry {
            path: &outcome.path,
            report: None,
            error: Some(Brief(err).to_string()),
        },
    });
    failed_inputs.chain(checked).collect()
}

pub fn handle(inputs: &[PathBuf], options: &FormatArgs, json: bool, quiet: bool) -> Result<i32> {
    let (formatter, data) = load_formatter(options)?;
    let selection = FileSelector::new(&data.files)
        .context("Invalid exclude pattern")?
        .select(inputs);

    let outcomes = files::process_all(&selection.files, &formatter, Mode::Check);
    let summary = Summary::new(&outcomes, &selection.errors);

    if json {
        let output = JsonOutput {
            files: json_entries(&outcomes, &selection.errors),
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        for err in &selection.errors {
            print_failure(err);
        }
        return Ok(summary.exit_code());
    }

    for err in &selection.errors {
        print_failure(err);
    }
    for outcome in &outcomes {
        print_outcome(outcome, quiet);
    }

    if !quiet {
        let checked = outcomes.len();
        if summary.needs_formatting == 0 && summary.failed == 0 {
            println!("{} {} file(s) already formatted", "✓".bright_green(), checked);
        } else {
            println!(
                "\n{} of {} file(s) need formatting",
                summary.needs_formatting.to_string().bright_yellow().bold(),
                checked
            );
            if summary.needs_formatting > 0 {
                let command = "whitespace-format format".bright_cyan();
                println!("Run {} to apply the changes", command);
            }
        }
    }

    Ok(summary.exit_code())
}
