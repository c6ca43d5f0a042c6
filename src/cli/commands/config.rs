use anyhow::{Context, Result};
use colored::Colorize;

use super::load_formatter;
use crate::cli::FormatArgs;
use whitespace_format::config::ConfigData;
use whitespace_format::validation::ConfigValidator;

pub fn handle(options: &FormatArgs, quiet: bool) -> Result<i32> {
    let (formatter, data) = load_formatter(options)?;
    ConfigValidator::validate_excludes(&data.files.exclude).context("Invalid exclude pattern")?;

    // Validation may have adjusted dependent options
    let effective = ConfigData {
        format: formatter.config().options().clone(),
        files: data.files,
    };

    if !quiet {
        println!("{}", "# Effective configuration".bright_black());
    }
    print!("{}", toml::to_string_pretty(&effective)?);

    Ok(0)
}
