use regex::Regex;

use crate::config::{Config, DegenerateFileMode, FormatOptions};
use crate::error::ConfigError;

/// Checks option combinations once, before any file is touched
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate formatting options and apply the implications between them
    pub fn validate(options: &FormatOptions) -> Result<Config, ConfigError> {
        let mut options = options.clone();

        if options.add_new_line_marker_at_end_of_file
            && options.remove_new_line_marker_from_end_of_file
        {
            return Err(ConfigError::Conflict {
                first: "add_new_line_marker_at_end_of_file",
                second: "remove_new_line_marker_from_end_of_file",
            });
        }

        if options.normalize_whitespace_only_files == DegenerateFileMode::Empty {
            match options.normalize_empty_files {
                DegenerateFileMode::OneLine => {
                    return Err(ConfigError::ForbiddenCombination {
                        field: "normalize_whitespace_only_files",
                        value: "empty".to_string(),
                        other: "normalize_empty_files",
                        other_value: "one-line".to_string(),
                    });
                }
                DegenerateFileMode::Ignore => {
                    options.normalize_empty_files = DegenerateFileMode::Empty;
                }
                DegenerateFileMode::Empty => {}
            }
        }

        // No blank line may remain in front of a final line without terminator
        if options.remove_new_line_marker_from_end_of_file {
            options.remove_trailing_empty_lines = true;
        }

        tracing::debug!(?options, "configuration validated");
        Ok(Config::from_validated(options))
    }

    /// Compile exclusion patterns
    pub fn validate_excludes(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
        patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }
}
