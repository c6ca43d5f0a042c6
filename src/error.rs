use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;
use thiserror::Error;

/// Exit code when check-only mode finds files that need formatting
pub const EXIT_NEEDS_FORMATTING: i32 = 1;
pub const EXIT_READ_ERROR: i32 = 2;
pub const EXIT_DECODE_ERROR: i32 = 3;
pub const EXIT_WRITE_ERROR: i32 = 4;
pub const EXIT_CONFIG_ERROR: i32 = 5;

/// Main error type for whitespace-format operations
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot decode {path:?} as UTF-8: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("Cannot write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl FormatError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            FormatError::Read { .. } => EXIT_READ_ERROR,
            FormatError::Decode { .. } => EXIT_DECODE_ERROR,
            FormatError::Write { .. } => EXIT_WRITE_ERROR,
            FormatError::Config(_) => EXIT_CONFIG_ERROR,
        }
    }

    /// File the error is tied to; other files may still be processed
    pub fn path(&self) -> Option<&Path> {
        match self {
            FormatError::Read { path, .. }
            | FormatError::Decode { path, .. }
            | FormatError::Write { path, .. } => Some(path.as_path()),
            FormatError::Config(_) => None,
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Options {first} and {second} cannot be used together")]
    Conflict {
        first: &'static str,
        second: &'static str,
    },

    #[error("{field} = {value} requires {other} to be empty or ignore, found {other_value}")]
    ForbiddenCombination {
        field: &'static str,
        value: String,
        other: &'static str,
        other_value: String,
    },

    #[error("Invalid exclude pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read configuration file {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse configuration file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write configuration file {path:?}: {message}")]
    Save { path: PathBuf, message: String },
}

/// Result type alias for whitespace-format operations
pub type FormatResult<T> = Result<T, FormatError>;

/// Attach a file path to I/O errors
pub trait ErrorContext<T> {
    fn read_context(self, path: impl Into<PathBuf>) -> FormatResult<T>;

    fn write_context(self, path: impl Into<PathBuf>) -> FormatResult<T>;
}

impl<T> ErrorContext<T> for Result<T, io::Error> {
    fn read_context(self, path: impl Into<PathBuf>) -> FormatResult<T> {
        self.map_err(|source| FormatError::Read {
            path: path.into(),
            source,
        })
    }

    fn write_context(self, path: impl Into<PathBuf>) -> FormatResult<T> {
        self.map_err(|source| FormatError::Write {
            path: path.into(),
            source,
        })
    }
}

/// Error display helper for the CLI
pub fn display_error(error: &(dyn std::error::Error + 'static)) {
    use colored::Colorize;

    eprintln!("\n{} {}", "✗".bright_red().bold(), "Operation failed".bright_red().bold());
    eprintln!("  {} {}", "├".bright_black(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} Caused by: {}", "├".bright_black(), err);
        source = err.source();
    }

    let chain = || std::iter::successors(Some(error), |err| err.source());
    let config_error = chain().find_map(|err| {
        err.downcast_ref::<ConfigError>().or_else(|| match err.downcast_ref::<FormatError>() {
            Some(FormatError::Config(config)) => Some(config),
            _ => None,
        })
    });
    let format_error = chain().find_map(|err| err.downcast_ref::<FormatError>());

    match (config_error, format_error) {
        (Some(ConfigError::Conflict { .. }), _) => {
            eprintln!("  {} Drop one of the conflicting options", "└".bright_cyan());
        }
        (Some(ConfigError::ForbiddenCombination { .. }), _) => {
            eprintln!(
                "  {} Whitespace-only files emptied would turn into one-line files on the next run",
                "└".bright_cyan()
            );
        }
        (Some(ConfigError::Parse { .. }), _) => {
            eprintln!(
                "  {} Run {} to write a fresh configuration",
                "└".bright_cyan(),
                "whitespace-format init".bright_cyan()
            );
        }
        (Some(ConfigError::InvalidPattern { .. }), _) => {
            eprintln!(
                "  {} Exclude patterns are regular expressions, not globs",
                "└".bright_cyan()
            );
        }
        (_, Some(FormatError::Decode { .. })) => {
            eprintln!(
                "  {} Only UTF-8 text files are supported; exclude binary files",
                "└".bright_cyan()
            );
        }
        (_, Some(FormatError::Read { .. })) | (_, Some(FormatError::Write { .. })) => {
            eprintln!("  {} Check that the file exists and its permissions", "└".bright_cyan());
        }
        _ => {
            eprintln!(
                "  {} Run with {} for more details",
                "└".bright_black(),
                "--verbose".bright_cyan()
            );
        }
    }
}

/// Short, single-line rendering used in per-file reports
pub struct Brief<'a>(pub &'a FormatError);

impl fmt::Display for Brief<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            FormatError::Read { source, .. } => write!(f, "cannot read: {}", source),
            FormatError::Decode { .. } => write!(f, "cannot decode as UTF-8"),
            FormatError::Write { source, .. } => write!(f, "cannot write: {}", source),
            other => write!(f, "{}", other),
        }
    }
}
