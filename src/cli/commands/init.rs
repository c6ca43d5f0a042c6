use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use whitespace_format::config::project::CONFIG_FILE_NAME;
use whitespace_format::config::ProjectConfig;

pub fn handle(path: &Path, quiet: bool) -> Result<i32> {
    let written = ProjectConfig::init(path)
        .context("Failed to initialize whitespace-format in the specified directory")?;

    if quiet {
        return Ok(0);
    }

    let config_path = path.join(CONFIG_FILE_NAME);
    if written {
        println!("{} Created {}", "✓".bright_green(), config_path.display());
        println!("\n{}", "Next steps:".bright_blue().bold());
        println!("  1. Turn on the options you want under {}", "[format]".bright_cyan());
        println!("  2. Run {}", "whitespace-format check .".bright_cyan());
    } else {
        println!("{} {} already exists", "ℹ".bright_blue(), config_path.display());
    }

    Ok(0)
}
