pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use whitespace_format::config::{
    ConfigData, DegenerateFileMode, NewLineMarker, NonStandardWhitespace, ProjectConfig,
};
use whitespace_format::error::ConfigError;

#[derive(Parser)]
#[command(name = "whitespace-format")]
#[command(
    about = "Normalize line endings, trailing whitespace and empty lines in text files",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Only report errors")]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "Log what happens to each file")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Report files that need formatting without changing them")]
    Check {
        #[arg(required = true, help = "Files or directories to check")]
        files: Vec<PathBuf>,
        #[arg(long, help = "Print the change reports as JSON")]
        json: bool,
        #[command(flatten)]
        options: FormatArgs,
    },

    #[command(about = "Format files in place")]
    Format {
        #[arg(required = true, help = "Files or directories to format")]
        files: Vec<PathBuf>,
        #[command(flatten)]
        options: FormatArgs,
    },

    #[command(about = "Show the formatted content of a file without writing it")]
    Preview {
        #[arg(help = "File path to preview")]
        file: PathBuf,
        #[arg(short, long, help = "Show a line diff instead of the formatted content")]
        diff: bool,
        #[command(flatten)]
        options: FormatArgs,
    },

    #[command(about = "Format standard input to standard output (usable as a Git clean filter)")]
    Filter {
        #[command(flatten)]
        options: FormatArgs,
    },

    #[command(about = "Write a default .whitespace-format.toml")]
    Init {
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },

    #[command(about = "Print the effective configuration")]
    Config {
        #[command(flatten)]
        options: FormatArgs,
    },
}

/// Formatting options given on the command line. Each one that is set
/// overrides the value from the configuration file.
#[derive(Args, Debug, Default, Clone)]
pub struct FormatArgs {
    #[arg(
        long,
        value_name = "PATH",
        env = "WHITESPACE_FORMAT_CONFIG",
        help = "Configuration file [default: ./.whitespace-format.toml]"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, help = "Line terminator to normalize to")]
    pub new_line_marker: Option<NewLineMarker>,

    #[arg(long, help = "Rewrite every line terminator to the target one")]
    pub normalize_new_line_markers: bool,

    #[arg(long, help = "Make sure the last line ends with a terminator")]
    pub add_new_line_marker_at_end_of_file: bool,

    #[arg(long, help = "Make sure the last line has no terminator")]
    pub remove_new_line_marker_from_end_of_file: bool,

    #[arg(long)]
    pub remove_trailing_whitespace: bool,

    #[arg(long)]
    pub remove_leading_empty_lines: bool,

    #[arg(long)]
    pub remove_trailing_empty_lines: bool,

    #[arg(
        long,
        value_name = "N",
        allow_negative_numbers = true,
        help = "Replace each tab with N spaces; 0 removes tabs, negative leaves them"
    )]
    pub replace_tabs_with_spaces: Option<i64>,

    #[arg(long, value_enum, help = "Treatment of vertical tabs and form feeds")]
    pub normalize_non_standard_whitespace: Option<NonStandardWhitespace>,

    #[arg(long, value_enum)]
    pub normalize_empty_files: Option<DegenerateFileMode>,

    #[arg(long, value_enum)]
    pub normalize_whitespace_only_files: Option<DegenerateFileMode>,

    #[arg(long, value_name = "REGEX", help = "Skip paths matching this pattern (repeatable)")]
    pub exclude: Vec<String>,

    #[arg(long, help = "Follow symbolic links instead of skipping them")]
    pub follow_symlinks: bool,
}

impl FormatArgs {
    /// Load the configuration file and apply the command-line overrides
    pub fn load(&self) -> Result<ConfigData, ConfigError> {
        let project = match &self.config {
            Some(path) => ProjectConfig::load(path)?,
            None => ProjectConfig::load_or_default(".")?,
        };
        Ok(self.apply(project.data))
    }

    pub fn apply(&self, mut data: ConfigData) -> ConfigData {
        let format = &mut data.format;

        if let Some(marker) = self.new_line_marker {
            format.new_line_marker = marker;
        }
        format.normalize_new_line_markers |= self.normalize_new_line_markers;
        format.add_new_line_marker_at_end_of_file |= self.add_new_line_marker_at_end_of_file;
        format.remove_new_line_marker_from_end_of_file |=
            self.remove_new_line_marker_from_end_of_file;
        format.remove_trailing_whitespace |= self.remove_trailing_whitespace;
        format.remove_leading_empty_lines |= self.remove_leading_empty_lines;
        format.remove_trailing_empty_lines |= self.remove_trailing_empty_lines;
        if let Some(spaces) = self.replace_tabs_with_spaces {
            format.replace_tabs_with_spaces = spaces;
        }
        if let Some(mode) = self.normalize_non_standard_whitespace {
            format.normalize_non_standard_whitespace = mode;
        }
        if let Some(mode) = self.normalize_empty_files {
            format.normalize_empty_files = mode;
        }
        if let Some(mode) = self.normalize_whitespace_only_files {
            format.normalize_whitespace_only_files = mode;
        }

        data.files.exclude.extend(self.exclude.iter().cloned());
        data.files.follow_symlinks |= self.follow_symlinks;
        data
    }
}
