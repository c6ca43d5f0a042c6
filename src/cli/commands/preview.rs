use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::load_formatter;
use crate::cli::FormatArgs;
use whitespace_format::files::read_text;
use whitespace_format::report::{diff_lines, visible, DiffLine};

pub fn handle(file: &Path, diff: bool, options: &FormatArgs) -> Result<i32> {
    let (formatter, _) = load_formatter(options)?;
    let content = read_text(file)?;
    let formatted = formatter.format(&content);

    if !diff {
        print!("{}", formatted.content);
        return Ok(0);
    }

    println!("{}", "whitespace-format preview".bright_blue().bold());
    println!("{}", "=========================".bright_blue());
    println!("File: {}\n", file.display());

    if !formatted.needs_formatting() {
        println!("{} Already formatted", "✓".bright_green());
        return Ok(0);
    }

    for entry in diff_lines(&content, &formatted.content) {
        match entry {
            DiffLine::Same { old, line, .. } => {
                println!("{:>5}   {}", old, visible(&line).bright_black());
            }
            DiffLine::Removed { old, line } => {
                println!("{:>5} {} {}", old, "-".red(), visible(&line).red());
            }
            DiffLine::Added { new, line } => {
                println!("{:>5} {} {}", new, "+".green(), visible(&line).green());
            }
        }
    }

    println!("\n{}", "Changes:".bright_blue().bold());
    for change in formatted.report.iter() {
        println!("  {}", change);
    }

    Ok(0)
}
