mod cli;

use anyhow::Result;
use clap::Parser;
use cli::commands;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = cli::Cli::parse();

    // RUST_LOG wins; otherwise warnings only, or debug with --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run_command(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            commands::display_error(&err);
            std::process::exit(commands::exit_code(&err));
        }
    }
}

fn run_command(cli: cli::Cli) -> Result<i32> {
    use cli::Commands;

    let quiet = cli.quiet;
    match cli.command {
        Commands::Check {
            files,
            json,
            options,
        } => commands::check::handle(&files, &options, json, quiet),
        Commands::Format { files, options } => commands::format::handle(&files, &options, quiet),
        Commands::Preview {
            file,
            diff,
            options,
        } => commands::preview::handle(&file, diff, &options),
        Commands::Filter { options } => commands::filter::handle(&options),
        Commands::Init { path } => commands::init::handle(&path, quiet),
        Commands::Config { options } => commands::config::handle(&options, quiet),
    }
}
