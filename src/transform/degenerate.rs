use serde::Serialize;

use crate::config::{Config, DegenerateFileMode};
use crate::lines::is_whitespace;
use crate::report::{ChangeKind, ChangeLog};

/// Whole-file classification deciding whether the line pipeline runs at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentClass {
    Empty,
    WhitespaceOnly,
    Normal,
}

impl ContentClass {
    pub fn of(content: &str) -> Self {
        if content.is_empty() {
            ContentClass::Empty
        } else if content.chars().all(is_whitespace) {
            ContentClass::WhitespaceOnly
        } else {
            ContentClass::Normal
        }
    }

    pub fn is_degenerate(self) -> bool {
        self != ContentClass::Normal
    }
}

/// Apply the empty-file or whitespace-only-file mode to degenerate content.
///
/// Normal content is returned unchanged; it belongs to the line pipeline.
pub fn normalize(
    content: &str,
    class: ContentClass,
    config: &Config,
    changes: &mut ChangeLog,
) -> String {
    let (mode, kind) = match class {
        ContentClass::Empty => (config.normalize_empty_files(), ChangeKind::ReplacedEmptyFile),
        ContentClass::WhitespaceOnly => (
            config.normalize_whitespace_only_files(),
            ChangeKind::ReplacedWhitespaceOnlyFile,
        ),
        ContentClass::Normal => return content.to_string(),
    };

    let normalized = match mode {
        DegenerateFileMode::Ignore => return content.to_string(),
        DegenerateFileMode::Empty => String::new(),
        // Nothing to sample, so `auto` falls back to LF
        DegenerateFileMode::OneLine => {
            config.new_line_marker().resolve_default().as_str().to_string()
        }
    };

    if normalized != content {
        tracing::trace!(?class, ?mode, "replaced degenerate content");
        changes.record_file(kind);
    }
    normalized
}
