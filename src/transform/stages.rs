//! The individual steps of the line pipeline.
//!
//! Every stage is a total function over a [`LineSequence`]. A stage whose
//! option is switched off returns its input untouched, so the pipeline can
//! always run all of them in the same order.

use crate::config::NonStandardWhitespace;
use crate::lines::{is_blank, is_non_standard_whitespace, LineSequence, Terminator};
use crate::report::{ChangeKind, ChangeLog};

/// Per-file values shared by all stages of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// Terminator that normalized and added line endings use
    pub target: Terminator,
}

pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        lines: LineSequence,
        context: &Context,
        changes: &mut ChangeLog,
    ) -> LineSequence;
}

/// Replace or remove vertical tabs and form feeds
#[derive(Debug, Clone, Copy)]
pub struct NonStandardWhitespaceStage {
    pub mode: NonStandardWhitespace,
}

impl Stage for NonStandardWhitespaceStage {
    fn name(&self) -> &'static str {
        "non-standard-whitespace"
    }

    fn apply(
        &self,
        mut lines: LineSequence,
        _context: &Context,
        changes: &mut ChangeLog,
    ) -> LineSequence {
        let (replacement, kind) = match self.mode {
            NonStandardWhitespace::Ignore => return lines,
            NonStandardWhitespace::Replace => {
                (Some(' '), ChangeKind::ReplacedNonStandardWhitespace)
            }
            NonStandardWhitespace::Remove => (None, ChangeKind::RemovedNonStandardWhitespace),
        };

        for (number, line) in lines.numbered_mut() {
            if !line.content.contains(is_non_standard_whitespace) {
                continue;
            }
            line.content = line
                .content
                .chars()
                .filter_map(|ch| {
                    if is_non_standard_whitespace(ch) {
                        replacement
                    } else {
                        Some(ch)
                    }
                })
                .collect();
            changes.record(kind, number);
        }
        lines
    }
}

/// Replace every tab with a fixed number of spaces; negative means keep tabs
#[derive(Debug, Clone, Copy)]
pub struct TabStage {
    pub spaces: i64,
}

impl Stage for TabStage {
    fn name(&self) -> &'static str {
        "tabs"
    }

    fn apply(
        &self,
        mut lines: LineSequence,
        _context: &Context,
        changes: &mut ChangeLog,
    ) -> LineSequence {
        let Ok(spaces) = usize::try_from(self.spaces) else {
            return lines;
        };
        let replacement = " ".repeat(spaces);
        let kind = if spaces == 0 {
            ChangeKind::RemovedTabs
        } else {
            ChangeKind::ReplacedTabs
        };

        for (number, line) in lines.numbered_mut() {
            if line.content.contains('\t') {
                line.content = line.content.replace('\t', &replacement);
                changes.record(kind, number);
            }
        }
        lines
    }
}

/// Strip spaces, tabs, vertical tabs and form feeds from the end of each line
#[derive(Debug, Clone, Copy)]
pub struct TrailingWhitespaceStage {
    pub enabled: bool,
}

impl Stage for TrailingWhitespaceStage {
    fn name(&self) -> &'static str {
        "trailing-whitespace"
    }

    fn apply(
        &self,
        mut lines: LineSequence,
        _context: &Context,
        changes: &mut ChangeLog,
    ) -> LineSequence {
        if !self.enabled {
            return lines;
        }

        for (number, line) in lines.numbered_mut() {
            let trimmed = line.content.trim_end_matches(is_blank).len();
            if trimmed < line.content.len() {
                line.content.truncate(trimmed);
                changes.record(ChangeKind::RemovedTrailingWhitespace, number);
            }
        }
        lines
    }
}

/// Rewrite every present terminator to the target terminator
#[derive(Debug, Clone, Copy)]
pub struct NewLineMarkerStage {
    pub enabled: bool,
}

impl Stage for NewLineMarkerStage {
    fn name(&self) -> &'static str {
        "new-line-markers"
    }

    fn apply(
        &self,
        mut lines: LineSequence,
        context: &Context,
        changes: &mut ChangeLog,
    ) -> LineSequence {
        if !self.enabled {
            return lines;
        }

        for (number, line) in lines.numbered_mut() {
            if !line.terminator.is_none() && line.terminator != context.target {
                line.terminator = context.target;
                changes.record(ChangeKind::ReplacedNewLineMarker, number);
            }
        }
        lines
    }
}

/// Drop empty lines at the start of the file
#[derive(Debug, Clone, Copy)]
pub struct LeadingEmptyLinesStage {
    pub enabled: bool,
}

impl Stage for LeadingEmptyLinesStage {
    fn name(&self) -> &'static str {
        "leading-empty-lines"
    }

    fn apply(
        &self,
        mut lines: LineSequence,
        _context: &Context,
        changes: &mut ChangeLog,
    ) -> LineSequence {
        if !self.enabled {
            return lines;
        }

        let count = lines.lines().iter().take_while(|line| line.is_empty()).count();
        for index in 0..count {
            changes.record(ChangeKind::RemovedLeadingEmptyLine, lines.number(index));
        }
        lines.drop_front(count);
        lines
    }
}

/// Drop empty lines at the end of the file
#[derive(Debug, Clone, Copy)]
pub struct TrailingEmptyLinesStage {
    pub enabled: bool,
}

impl Stage for TrailingEmptyLinesStage {
    fn name(&self) -> &'static str {
        "trailing-empty-lines"
    }

    fn apply(
        &self,
        mut lines: LineSequence,
        _context: &Context,
        changes: &mut ChangeLog,
    ) -> LineSequence {
        if self.enabled {
            remove_trailing_empty_lines(&mut lines, changes);
        }
        lines
    }
}

fn remove_trailing_empty_lines(lines: &mut LineSequence, changes: &mut ChangeLog) {
    let count = lines.lines().iter().rev().take_while(|line| line.is_empty()).count();
    let keep = lines.len() - count;
    for index in keep..lines.len() {
        changes.record(ChangeKind::RemovedTrailingEmptyLine, lines.number(index));
    }
    lines.truncate(keep);
}

/// What happens to the terminator of the last line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfFile {
    Keep,
    Add,
    Remove,
}

#[derive(Debug, Clone, Copy)]
pub struct EndOfFileStage {
    pub mode: EndOfFile,
}

impl Stage for EndOfFileStage {
    fn name(&self) -> &'static str {
        "end-of-file"
    }

    fn apply(
        &self,
        mut lines: LineSequence,
        context: &Context,
        changes: &mut ChangeLog,
    ) -> LineSequence {
        match self.mode {
            EndOfFile::Keep => {}
            EndOfFile::Add => {
                let number = lines.last_number();
                if let (Some(line), Some(number)) = (lines.last_mut(), number) {
                    if line.terminator.is_none() {
                        line.terminator = context.target;
                        changes.record(ChangeKind::AddedNewLineMarkerAtEndOfFile, number);
                    }
                }
            }
            EndOfFile::Remove => {
                remove_trailing_empty_lines(&mut lines, changes);
                let number = lines.last_number();
                if let (Some(line), Some(number)) = (lines.last_mut(), number) {
                    if !line.terminator.is_none() {
                        line.terminator = Terminator::None;
                        changes.record(ChangeKind::RemovedNewLineMarkerFromEndOfFile, number);
                    }
                }
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::Line;
    use Terminator::{CrLf, Lf, None as NoEol};

    const LF_CONTEXT: Context = Context { target: Lf };

    fn run(stage: &dyn Stage, lines: Vec<Line>) -> (Vec<Line>, ChangeLog) {
        let mut changes = ChangeLog::new();
        let out = stage.apply(LineSequence::from(lines), &LF_CONTEXT, &mut changes);
        (out.into_lines(), changes)
    }

    #[test]
    fn test_non_standard_whitespace_modes() {
        let input = vec![Line::new("\x0b\x0c\t  ", Lf), Line::new("hello", NoEol)];

        let stage = NonStandardWhitespaceStage { mode: NonStandardWhitespace::Ignore };
        assert_eq!(run(&stage, input.clone()).0, input);

        let stage = NonStandardWhitespaceStage { mode: NonStandardWhitespace::Replace };
        let (out, changes) = run(&stage, input.clone());
        assert_eq!(out[0], Line::new("  \t  ", Lf));
        assert_eq!(changes.len(), 1);

        let stage = NonStandardWhitespaceStage { mode: NonStandardWhitespace::Remove };
        let (out, changes) = run(&stage, input);
        assert_eq!(out[0], Line::new("\t  ", Lf));
        assert_eq!(out[1], Line::new("hello", NoEol));
        assert_eq!(changes.into_report().changes()[0].line, Some(1));
    }

    #[test]
    fn test_tabs() {
        let input = vec![Line::new("\tx\t", Lf)];

        assert_eq!(run(&TabStage { spaces: -1 }, input.clone()).0, input);
        assert_eq!(run(&TabStage { spaces: 0 }, input.clone()).0, vec![Line::new("x", Lf)]);
        assert_eq!(run(&TabStage { spaces: 2 }, input).0, vec![Line::new("  x  ", Lf)]);
    }

    #[test]
    fn test_trailing_whitespace() {
        let input = vec![
            Line::new("\t\x0b\x0c hello  ", CrLf),
            Line::new(" line2 \t\x0c", NoEol),
        ];
        let (out, changes) = run(&TrailingWhitespaceStage { enabled: true }, input.clone());
        assert_eq!(out, vec![Line::new("\t\x0b\x0c hello", CrLf), Line::new(" line2", NoEol)]);
        assert_eq!(changes.len(), 2);

        assert_eq!(run(&TrailingWhitespaceStage { enabled: false }, input.clone()).0, input);
    }

    #[test]
    fn test_new_line_markers_leave_missing_terminator() {
        let input = vec![Line::new("a", CrLf), Line::new("b", Lf), Line::new("c", NoEol)];
        let (out, changes) = run(&NewLineMarkerStage { enabled: true }, input);
        assert_eq!(out, vec![Line::new("a", Lf), Line::new("b", Lf), Line::new("c", NoEol)]);
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_leading_empty_lines() {
        let input = vec![
            Line::new("", Lf),
            Line::new("", CrLf),
            Line::new("x", Lf),
            Line::new("", Lf),
        ];
        let mut changes = ChangeLog::new();
        let out = LeadingEmptyLinesStage { enabled: true }.apply(
            LineSequence::from(input),
            &LF_CONTEXT,
            &mut changes,
        );
        assert_eq!(out.lines(), &[Line::new("x", Lf), Line::new("", Lf)]);
        assert_eq!(out.number(0), 3);
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn test_leading_whitespace_line_is_not_empty() {
        let input = vec![Line::new("  ", Lf), Line::new("x", Lf)];
        assert_eq!(run(&LeadingEmptyLinesStage { enabled: true }, input.clone()).0, input);
    }

    #[test]
    fn test_trailing_empty_lines() {
        let input = vec![Line::new("hello", Lf), Line::new("", Lf), Line::new("", Lf)];
        let (out, changes) = run(&TrailingEmptyLinesStage { enabled: true }, input);
        assert_eq!(out, vec![Line::new("hello", Lf)]);

        let report = changes.into_report();
        let numbers: Vec<_> = report.iter().map(|record| record.line).collect();
        assert_eq!(numbers, vec![Some(2), Some(3)]);
    }

    #[test]
    fn test_add_end_of_file_marker() {
        let stage = EndOfFileStage { mode: EndOfFile::Add };
        let (out, changes) = run(&stage, vec![Line::new("x", NoEol)]);
        assert_eq!(out, vec![Line::new("x", Lf)]);
        assert_eq!(changes.len(), 1);

        let (out, changes) = run(&stage, vec![Line::new("x", CrLf)]);
        assert_eq!(out, vec![Line::new("x", CrLf)]);
        assert!(changes.is_empty());

        let (out, _) = run(&stage, vec![]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_remove_end_of_file_marker() {
        let stage = EndOfFileStage { mode: EndOfFile::Remove };
        let (out, _) = run(
            &stage,
            vec![Line::new("", Lf), Line::new("hello", Lf), Line::new("", Lf)],
        );
        assert_eq!(out, vec![Line::new("", Lf), Line::new("hello", NoEol)]);

        let (out, changes) = run(&stage, vec![Line::new("  ", NoEol)]);
        assert_eq!(out, vec![Line::new("  ", NoEol)]);
        assert!(changes.is_empty());
    }
}
