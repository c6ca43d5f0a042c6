use serde::Serialize;
use std::fmt;

use crate::lines::{is_blank, split_lines, Line};

/// Kind of change made to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    ReplacedEmptyFile,
    ReplacedWhitespaceOnlyFile,
    ReplacedNonStandardWhitespace,
    RemovedNonStandardWhitespace,
    ReplacedTabs,
    RemovedTabs,
    RemovedTrailingWhitespace,
    ReplacedNewLineMarker,
    RemovedLeadingEmptyLine,
    RemovedTrailingEmptyLine,
    AddedNewLineMarkerAtEndOfFile,
    RemovedNewLineMarkerFromEndOfFile,
}

impl ChangeKind {
    pub fn description(self) -> &'static str {
        match self {
            ChangeKind::ReplacedEmptyFile => "replaced empty file",
            ChangeKind::ReplacedWhitespaceOnlyFile => "replaced whitespace-only file",
            ChangeKind::ReplacedNonStandardWhitespace => {
                "replaced non-standard whitespace with spaces"
            }
            ChangeKind::RemovedNonStandardWhitespace => "removed non-standard whitespace",
            ChangeKind::ReplacedTabs => "replaced tabs with spaces",
            ChangeKind::RemovedTabs => "removed tabs",
            ChangeKind::RemovedTrailingWhitespace => "removed trailing whitespace",
            ChangeKind::ReplacedNewLineMarker => "replaced new line marker",
            ChangeKind::RemovedLeadingEmptyLine => "removed leading empty line",
            ChangeKind::RemovedTrailingEmptyLine => "removed trailing empty line",
            ChangeKind::AddedNewLineMarkerAtEndOfFile => "added new line marker at end of file",
            ChangeKind::RemovedNewLineMarkerFromEndOfFile => {
                "removed new line marker from end of file"
            }
        }
    }
}

/// One change; `line` is the 1-based line number in the original file, or
/// `None` for changes to the file as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub line: Option<usize>,
}

impl ChangeRecord {
    pub fn at_line(kind: ChangeKind, line: usize) -> Self {
        Self {
            kind,
            line: Some(line),
        }
    }

    pub fn file(kind: ChangeKind) -> Self {
        Self { kind, line: None }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.kind.description()),
            None => write!(f, "file: {}", self.kind.description()),
        }
    }
}

/// Append-only collector that pipeline stages write into
#[derive(Debug, Default)]
pub struct ChangeLog {
    records: Vec<ChangeRecord>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: ChangeKind, line: usize) {
        self.records.push(ChangeRecord::at_line(kind, line));
    }

    pub fn record_file(&mut self, kind: ChangeKind) {
        self.records.push(ChangeRecord::file(kind));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File-level changes first, then by line number. Changes to the same line
    /// keep the order in which the stages made them.
    pub fn into_report(mut self) -> ChangeReport {
        self.records.sort_by_key(|record| record.line);
        ChangeReport {
            changes: self.records,
        }
    }
}

/// Ordered list of changes made to one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeReport {
    changes: Vec<ChangeRecord>,
}

impl ChangeReport {
    pub fn changes(&self) -> &[ChangeRecord] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// A file needs formatting exactly when at least one change was made
    pub fn needs_formatting(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.changes.iter()
    }

    pub fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|record| record.kind == kind).count()
    }
}

impl fmt::Display for ChangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.changes {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

/// One entry of a line diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    Same { old: usize, new: usize, line: Line },
    Removed { old: usize, line: Line },
    Added { new: usize, line: Line },
}

impl DiffLine {
    pub fn is_change(&self) -> bool {
        !matches!(self, DiffLine::Same { .. })
    }
}

/// Above this many cells the middle section is reported as removed and added
/// wholesale instead of aligning it line by line.
const MAX_ALIGNMENT_CELLS: usize = 4_000_000;

/// Line-oriented diff of two texts. Terminators are part of each line, so a
/// changed line ending shows up as a changed line.
pub fn diff_lines(original: &str, formatted: &str) -> Vec<DiffLine> {
    let old = split_lines(original);
    let new = split_lines(formatted);

    let prefix = old
        .iter()
        .zip(&new)
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];

    let mut out = Vec::with_capacity(old.len().max(new.len()));
    for (i, line) in old[..prefix].iter().enumerate() {
        out.push(DiffLine::Same {
            old: i + 1,
            new: i + 1,
            line: line.clone(),
        });
    }

    align(old_mid, new_mid, prefix, prefix, &mut out);

    for i in 0..suffix {
        let old_index = old.len() - suffix + i;
        let new_index = new.len() - suffix + i;
        out.push(DiffLine::Same {
            old: old_index + 1,
            new: new_index + 1,
            line: old[old_index].clone(),
        });
    }

    out
}

fn align(old: &[Line], new: &[Line], old_base: usize, new_base: usize, out: &mut Vec<DiffLine>) {
    let (n, m) = (old.len(), new.len());

    if n.saturating_mul(m) > MAX_ALIGNMENT_CELLS {
        out.extend(old.iter().enumerate().map(|(i, line)| DiffLine::Removed {
            old: old_base + i + 1,
            line: line.clone(),
        }));
        out.extend(new.iter().enumerate().map(|(j, line)| DiffLine::Added {
            new: new_base + j + 1,
            line: line.clone(),
        }));
        return;
    }

    // Longest common subsequence table, filled from the end
    let width = m + 1;
    let mut table = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if old[i] == new[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        if i < n && j < m && old[i] == new[j] {
            out.push(DiffLine::Same {
                old: old_base + i + 1,
                new: new_base + j + 1,
                line: old[i].clone(),
            });
            i += 1;
            j += 1;
        } else if j == m || (i < n && table[(i + 1) * width + j] >= table[i * width + j + 1]) {
            out.push(DiffLine::Removed {
                old: old_base + i + 1,
                line: old[i].clone(),
            });
            i += 1;
        } else {
            out.push(DiffLine::Added {
                new: new_base + j + 1,
                line: new[j].clone(),
            });
            j += 1;
        }
    }
}

/// Render whitespace so that it can be seen in a terminal
pub fn visible(line: &Line) -> String {
    let content = &line.content;
    let trailing_start = content.trim_end_matches(is_blank).len();

    let mut out = String::with_capacity(content.len() + 4);
    for (index, ch) in content.char_indices() {
        match ch {
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            '\x0c' => out.push_str("\\f"),
            ' ' if index >= trailing_start => out.push('·'),
            other => out.push(other),
        }
    }
    if !line.terminator.is_none() {
        out.push_str(&line.terminator.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::Terminator;

    #[test]
    fn test_report_orders_file_level_first() {
        let mut log = ChangeLog::new();
        log.record(ChangeKind::RemovedTrailingWhitespace, 3);
        log.record(ChangeKind::ReplacedTabs, 1);
        log.record(ChangeKind::ReplacedNewLineMarker, 1);
        log.record_file(ChangeKind::ReplacedEmptyFile);

        let report = log.into_report();
        let lines: Vec<_> = report.iter().map(|record| record.line).collect();
        assert_eq!(lines, vec![None, Some(1), Some(1), Some(3)]);
        // stage order is kept within one line
        assert_eq!(report.changes()[1].kind, ChangeKind::ReplacedTabs);
        assert_eq!(report.changes()[2].kind, ChangeKind::ReplacedNewLineMarker);
    }

    #[test]
    fn test_report_display() {
        let mut log = ChangeLog::new();
        log.record(ChangeKind::RemovedTrailingWhitespace, 2);
        log.record_file(ChangeKind::ReplacedWhitespaceOnlyFile);

        let report = log.into_report();
        assert!(report.needs_formatting());
        assert_eq!(
            report.to_string(),
            "file: replaced whitespace-only file\nline 2: removed trailing whitespace\n"
        );
    }

    #[test]
    fn test_report_json() {
        let mut log = ChangeLog::new();
        log.record(ChangeKind::AddedNewLineMarkerAtEndOfFile, 7);
        let json = serde_json::to_string(&log.into_report()).unwrap();
        assert_eq!(json, r#"[{"kind":"added_new_line_marker_at_end_of_file","line":7}]"#);
    }

    #[test]
    fn test_empty_report() {
        let report = ChangeLog::new().into_report();
        assert!(!report.needs_formatting());
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn test_diff_identical() {
        let diff = diff_lines("a\nb\n", "a\nb\n");
        assert_eq!(diff.len(), 2);
        assert!(diff.iter().all(|line| !line.is_change()));
    }

    #[test]
    fn test_diff_changed_line() {
        let diff = diff_lines("a\nb  \nc\n", "a\nb\nc\n");
        let changes: Vec<_> = diff.into_iter().filter(DiffLine::is_change).collect();
        assert_eq!(
            changes,
            vec![
                DiffLine::Removed { old: 2, line: Line::new("b  ", Terminator::Lf) },
                DiffLine::Added { new: 2, line: Line::new("b", Terminator::Lf) },
            ]
        );
    }

    #[test]
    fn test_diff_removed_leading_lines() {
        let diff = diff_lines("\n\nx\ny\n", "x\ny\n");
        let removed = diff
            .iter()
            .filter(|line| matches!(line, DiffLine::Removed { .. }))
            .count();
        assert_eq!(removed, 2);
        assert!(diff.contains(&DiffLine::Same {
            old: 3,
            new: 1,
            line: Line::new("x", Terminator::Lf),
        }));
    }

    #[test]
    fn test_visible() {
        assert_eq!(visible(&Line::new("a\tb  ", Terminator::CrLf)), "a\\tb··\\r\\n");
        assert_eq!(visible(&Line::new("a b", Terminator::None)), "a b");
    }
}
