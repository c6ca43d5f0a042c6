use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use super::{load_formatter, print_failure, print_outcome};
use crate::cli::FormatArgs;
use whitespace_format::files::{self, FileSelector, Mode, Summary};

pub fn handle(inputs: &[PathBuf], options: &FormatArgs, quiet: bool) -> Result<i32> {
    let (formatter, data) = load_formatter(options)?;
    let selection = FileSelector::new(&data.files)
        .context("Invalid exclude pattern")?
        .select(inputs);

    let outcomes = files::process_all(&selection.files, &formatter, Mode::Write);
    let summary = Summary::new(&outcomes, &selection.errors);

    for err in &selection.errors {
        print_failure(err);
    }
    for outcome in &outcomes {
        print_outcome(outcome, quiet);
    }

    if !quiet {
        println!(
            "{} Formatted {} of {} file(s)",
            "✓".bright_green(),
            summary.formatted.to_string().bold(),
            outcomes.len()
        );
        if summary.failed > 0 {
            println!("{} {} file(s) failed", "⚠".bright_red(), summary.failed);
        }
    }

    Ok(summary.exit_code())
}
