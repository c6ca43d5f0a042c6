pub mod project;

pub use project::ProjectConfig;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::lines::{MarkerCounts, Terminator};

/// Target line terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum NewLineMarker {
    /// Most common terminator of each individual file
    #[default]
    Auto,
    /// `\n`
    Linux,
    /// `\r`
    Mac,
    /// `\r\n`
    Windows,
}

impl NewLineMarker {
    /// Resolve against the terminator counts of the file being formatted
    pub fn resolve(self, counts: &MarkerCounts) -> Terminator {
        match self {
            NewLineMarker::Auto => counts.most_common(),
            NewLineMarker::Linux => Terminator::Lf,
            NewLineMarker::Mac => Terminator::Cr,
            NewLineMarker::Windows => Terminator::CrLf,
        }
    }

    /// Resolve without any terminators to sample from
    pub fn resolve_default(self) -> Terminator {
        self.resolve(&MarkerCounts::default())
    }
}

/// Treatment of vertical tab and form feed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum NonStandardWhitespace {
    #[default]
    Ignore,
    /// Replace each one with a single space
    Replace,
    Remove,
}

/// Treatment of empty or whitespace-only files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DegenerateFileMode {
    #[default]
    Ignore,
    /// Replace with a file of zero bytes
    Empty,
    /// Replace with a single line terminator
    OneLine,
}

/// Formatting options as written by the user, not yet validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOptions {
    pub new_line_marker: NewLineMarker,
    pub normalize_new_line_markers: bool,
    pub add_new_line_marker_at_end_of_file: bool,
    pub remove_new_line_marker_from_end_of_file: bool,
    pub remove_trailing_whitespace: bool,
    pub remove_leading_empty_lines: bool,
    pub remove_trailing_empty_lines: bool,
    /// Negative leaves tabs alone, zero deletes them
    pub replace_tabs_with_spaces: i64,
    pub normalize_non_standard_whitespace: NonStandardWhitespace,
    pub normalize_empty_files: DegenerateFileMode,
    pub normalize_whitespace_only_files: DegenerateFileMode,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            new_line_marker: NewLineMarker::Auto,
            normalize_new_line_markers: false,
            add_new_line_marker_at_end_of_file: false,
            remove_new_line_marker_from_end_of_file: false,
            remove_trailing_whitespace: false,
            remove_leading_empty_lines: false,
            remove_trailing_empty_lines: false,
            replace_tabs_with_spaces: -1,
            normalize_non_standard_whitespace: NonStandardWhitespace::Ignore,
            normalize_empty_files: DegenerateFileMode::Ignore,
            normalize_whitespace_only_files: DegenerateFileMode::Ignore,
        }
    }
}

/// File selection options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilesOptions {
    /// Regular expressions; matching paths are skipped
    pub exclude: Vec<String>,
    pub follow_symlinks: bool,
}

/// Contents of `.whitespace-format.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigData {
    pub format: FormatOptions,
    pub files: FilesOptions,
}

/// Validated formatting configuration.
///
/// Only [`crate::validation::ConfigValidator`] creates one, so holding a
/// `Config` means the options are consistent and their implications have been
/// applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    options: FormatOptions,
}

impl Config {
    pub(crate) fn from_validated(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn new_line_marker(&self) -> NewLineMarker {
        self.options.new_line_marker
    }

    pub fn normalize_new_line_markers(&self) -> bool {
        self.options.normalize_new_line_markers
    }

    pub fn add_new_line_marker_at_end_of_file(&self) -> bool {
        self.options.add_new_line_marker_at_end_of_file
    }

    pub fn remove_new_line_marker_from_end_of_file(&self) -> bool {
        self.options.remove_new_line_marker_from_end_of_file
    }

    pub fn remove_trailing_whitespace(&self) -> bool {
        self.options.remove_trailing_whitespace
    }

    pub fn remove_leading_empty_lines(&self) -> bool {
        self.options.remove_leading_empty_lines
    }

    pub fn remove_trailing_empty_lines(&self) -> bool {
        self.options.remove_trailing_empty_lines
    }

    pub fn replace_tabs_with_spaces(&self) -> i64 {
        self.options.replace_tabs_with_spaces
    }

    pub fn normalize_non_standard_whitespace(&self) -> NonStandardWhitespace {
        self.options.normalize_non_standard_whitespace
    }

    pub fn normalize_empty_files(&self) -> DegenerateFileMode {
        self.options.normalize_empty_files
    }

    pub fn normalize_whitespace_only_files(&self) -> DegenerateFileMode {
        self.options.normalize_whitespace_only_files
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_validated(FormatOptions::default())
    }
}
