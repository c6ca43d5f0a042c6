pub mod atomic;
pub mod discover;

pub use atomic::AtomicFile;
pub use discover::{FileSelector, Selection};

use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ErrorContext, FormatError, FormatResult, EXIT_NEEDS_FORMATTING};
use crate::report::ChangeReport;
use crate::transform::ContentClass;
use crate::Formatter;

/// Whether formatted content is written back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Check,
    Write,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Unchanged,
    NeedsFormatting,
    Formatted,
}

/// What happened to one file
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub status: FileStatus,
    pub class: ContentClass,
    pub changes: ChangeReport,
}

#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: FormatResult<FileReport>,
}

/// Read a file and decode it as UTF-8
pub fn read_text(path: &Path) -> FormatResult<String> {
    let bytes = fs::read(path).read_context(path)?;
    String::from_utf8(bytes).map_err(|source| FormatError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

pub fn process_file(path: &Path, formatter: &Formatter, mode: Mode) -> FileOutcome {
    let result = format_file(path, formatter, mode);
    match &result {
        Ok(report) => tracing::debug!(path = %path.display(), status = ?report.status, "processed"),
        Err(err) => tracing::warn!(path = %path.display(), error = %err, "failed"),
    }
    FileOutcome {
        path: path.to_path_buf(),
        result,
    }
}

fn format_file(path: &Path, formatter: &Formatter, mode: Mode) -> FormatResult<FileReport> {
    let content = read_text(path)?;
    let formatted = formatter.format(&content);

    let status = if !formatted.needs_formatting() {
        FileStatus::Unchanged
    } else if mode == Mode::Write {
        AtomicFile::new(path)
            .and_then(|file| file.write(formatted.content.as_bytes()))
            .write_context(path)?;
        FileStatus::Formatted
    } else {
        FileStatus::NeedsFormatting
    };

    Ok(FileReport {
        status,
        class: formatted.class,
        changes: formatted.report,
    })
}

/// Process files in parallel. Outcomes come back in the order of `paths`.
pub fn process_all(paths: &[PathBuf], formatter: &Formatter, mode: Mode) -> Vec<FileOutcome> {
    paths
        .par_iter()
        .map(|path| process_file(path, formatter, mode))
        .collect()
}

/// Totals over one run and the exit code they lead to
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub unchanged: usize,
    pub needs_formatting: usize,
    pub formatted: usize,
    pub failed: usize,
    #[serde(skip)]
    first_error_code: Option<i32>,
}

impl Summary {
    pub fn new<'a>(
        outcomes: impl IntoIterator<Item = &'a FileOutcome>,
        selection_errors: &[FormatError],
    ) -> Self {
        let mut summary = Self::default();
        for error in selection_errors {
            summary.record_error(error);
        }
        for outcome in outcomes {
            match &outcome.result {
                Ok(report) => match report.status {
                    FileStatus::Unchanged => summary.unchanged += 1,
                    FileStatus::NeedsFormatting => summary.needs_formatting += 1,
                    FileStatus::Formatted => summary.formatted += 1,
                },
                Err(error) => summary.record_error(error),
            }
        }
        summary
    }

    fn record_error(&mut self, error: &FormatError) {
        self.failed += 1;
        self.first_error_code.get_or_insert(error.exit_code());
    }

    /// Errors take precedence over files that need formatting
    pub fn exit_code(&self) -> i32 {
        match self.first_error_code {
            Some(code) => code,
            None if self.needs_formatting > 0 => EXIT_NEEDS_FORMATTING,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormatOptions;
    use crate::error::{EXIT_DECODE_ERROR, EXIT_READ_ERROR};
    use tempfile::TempDir;

    fn formatter() -> Formatter {
        Formatter::new(&FormatOptions {
            remove_trailing_whitespace: true,
            ..FormatOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn test_check_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.txt");
        fs::write(&path, "a  \n").unwrap();

        let outcome = process_file(&path, &formatter(), Mode::Check);
        let report = outcome.result.unwrap();
        assert_eq!(report.status, FileStatus::NeedsFormatting);
        assert_eq!(report.changes.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a  \n");
    }

    #[test]
    fn test_write_mode_writes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.txt");
        fs::write(&path, "a  \n").unwrap();

        let outcome = process_file(&path, &formatter(), Mode::Write);
        assert_eq!(outcome.result.unwrap().status, FileStatus::Formatted);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n");

        let outcome = process_file(&path, &formatter(), Mode::Write);
        assert_eq!(outcome.result.unwrap().status, FileStatus::Unchanged);
    }

    #[test]
    fn test_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blob.bin");
        fs::write(&path, [0x66, 0xff, 0x0a]).unwrap();

        let outcome = process_file(&path, &formatter(), Mode::Check);
        let err = outcome.result.unwrap_err();
        assert_eq!(err.exit_code(), EXIT_DECODE_ERROR);
    }

    #[test]
    fn test_errors_do_not_stop_other_files() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.txt");
        let missing = temp_dir.path().join("missing.txt");
        let dirty = temp_dir.path().join("dirty.txt");
        fs::write(&good, "ok\n").unwrap();
        fs::write(&dirty, "dirty \n").unwrap();

        let paths = vec![good.clone(), missing.clone(), dirty.clone()];
        let outcomes = process_all(&paths, &formatter(), Mode::Check);
        let order: Vec<_> = outcomes.iter().map(|o| o.path.clone()).collect();
        assert_eq!(order, paths);

        let summary = Summary::new(&outcomes, &[]);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.needs_formatting, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.exit_code(), EXIT_READ_ERROR);
    }

    #[test]
    fn test_summary_exit_codes() {
        assert_eq!(Summary::default().exit_code(), 0);

        let summary = Summary {
            needs_formatting: 2,
            ..Summary::default()
        };
        assert_eq!(summary.exit_code(), EXIT_NEEDS_FORMATTING);

        let summary = Summary {
            formatted: 3,
            ..Summary::default()
        };
        assert_eq!(summary.exit_code(), 0);
    }
}
