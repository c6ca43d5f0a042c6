use regex::Regex;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::config::FilesOptions;
use crate::error::{ConfigError, FormatError};
use crate::validation::ConfigValidator;

/// Files picked from the command line inputs, plus the inputs that could not
/// be listed
#[derive(Debug, Default)]
pub struct Selection {
    pub files: Vec<PathBuf>,
    pub errors: Vec<FormatError>,
}

/// Expands directories and applies exclusion patterns and the symlink policy
#[derive(Debug, Clone)]
pub struct FileSelector {
    excludes: Vec<Regex>,
    follow_symlinks: bool,
}

impl FileSelector {
    pub fn new(options: &FilesOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            excludes: ConfigValidator::validate_excludes(&options.exclude)?,
            follow_symlinks: options.follow_symlinks,
        })
    }

    /// Exclusion patterns match against the path with `/` separators
    pub fn is_excluded(&self, path: &Path) -> bool {
        let normalized = path.to_string_lossy().replace('\\', "/");
        self.excludes.iter().any(|pattern| pattern.is_match(&normalized))
    }

    pub fn select(&self, inputs: &[PathBuf]) -> Selection {
        let mut selection = Selection::default();

        for input in inputs {
            let metadata = match fs::symlink_metadata(input) {
                Ok(metadata) => metadata,
                Err(source) => {
                    selection.errors.push(FormatError::Read {
                        path: input.clone(),
                        source,
                    });
                    continue;
                }
            };

            if metadata.file_type().is_symlink() && !self.follow_symlinks {
                tracing::debug!(path = %input.display(), "skipping symbolic link");
                continue;
            }

            if input.is_dir() {
                self.walk(input, &mut selection);
            } else if self.is_excluded(input) {
                tracing::debug!(path = %input.display(), "excluded");
            } else {
                selection.files.push(without_cur_dir(input));
            }
        }

        selection.files.sort();
        selection.files.dedup();
        selection
    }

    fn walk(&self, root: &Path, selection: &mut Selection) {
        for entry in WalkDir::new(root).follow_links(self.follow_symlinks) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    let source = err.into_io_error().unwrap_or_else(|| {
                        io::Error::new(io::ErrorKind::Other, "file system loop")
                    });
                    selection.errors.push(FormatError::Read { path, source });
                    continue;
                }
            };

            if entry.path_is_symlink() && !self.follow_symlinks {
                continue;
            }
            if !entry.file_type().is_file() {
                continue;
            }
            if self.is_excluded(entry.path()) {
                tracing::debug!(path = %entry.path().display(), "excluded");
                continue;
            }
            selection.files.push(without_cur_dir(entry.path()));
        }
    }
}

/// `./a.txt` and `a.txt` name the same file; drop `.` components so they
/// compare equal
fn without_cur_dir(path: &Path) -> PathBuf {
    let stripped: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    if stripped.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        stripped
    }
}
