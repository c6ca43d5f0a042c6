pub mod markers;
pub mod types;

pub use markers::MarkerCounts;
pub use types::{Line, Terminator};

pub const VERTICAL_TAB: char = '\x0b';
pub const FORM_FEED: char = '\x0c';

/// Vertical tab or form feed
pub fn is_non_standard_whitespace(ch: char) -> bool {
    ch == VERTICAL_TAB || ch == FORM_FEED
}

/// Whitespace that can appear inside a line
pub fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t' || is_non_standard_whitespace(ch)
}

/// Whitespace including line terminators
pub fn is_whitespace(ch: char) -> bool {
    is_blank(ch) || ch == '\n' || ch == '\r'
}

/// Split text into lines. Every line keeps its own terminator so that
/// concatenating the result reproduces the input exactly.
pub fn split_lines(text: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let terminator = match bytes[i] {
            b'\n' => Some((Terminator::Lf, 1)),
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => Some((Terminator::CrLf, 2)),
            b'\r' => Some((Terminator::Cr, 1)),
            _ => None,
        };

        match terminator {
            Some((terminator, width)) => {
                lines.push(Line::new(&text[start..i], terminator));
                i += width;
                start = i;
            }
            None => i += 1,
        }
    }

    if start < bytes.len() {
        lines.push(Line::new(&text[start..], Terminator::None));
    }

    lines
}

pub fn concatenate_lines(lines: &[Line]) -> String {
    let capacity = lines
        .iter()
        .map(|line| line.content.len() + line.terminator.as_str().len())
        .sum();
    let mut out = String::with_capacity(capacity);
    for line in lines {
        line.push_to(&mut out);
    }
    out
}

/// Lines of one file while they move through the pipeline.
///
/// Lines are only ever removed from the front or the back, so the source line
/// number of every surviving line is `offset + index + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineSequence {
    lines: Vec<Line>,
    offset: usize,
}

impl LineSequence {
    pub fn parse(text: &str) -> Self {
        Self::from(split_lines(text))
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Source line number (1-based) of the line at `index`
    pub fn number(&self, index: usize) -> usize {
        self.offset + index + 1
    }

    pub fn last_number(&self) -> Option<usize> {
        self.lines.len().checked_sub(1).map(|index| self.number(index))
    }

    pub fn numbered_mut(&mut self) -> impl Iterator<Item = (usize, &mut Line)> {
        let offset = self.offset;
        self.lines
            .iter_mut()
            .enumerate()
            .map(move |(index, line)| (offset + index + 1, line))
    }

    pub fn last_mut(&mut self) -> Option<&mut Line> {
        self.lines.last_mut()
    }

    /// Remove `count` lines from the front
    pub fn drop_front(&mut self, count: usize) {
        let count = count.min(self.lines.len());
        self.lines.drain(..count);
        self.offset += count;
    }

    /// Keep only the first `len` lines
    pub fn truncate(&mut self, len: usize) {
        self.lines.truncate(len);
    }

    /// Drop a final line that has neither content nor terminator
    pub fn drop_dummy_tail(&mut self) {
        if self.lines.last().is_some_and(Line::is_dummy) {
            self.lines.pop();
        }
    }

    pub fn to_text(&self) -> String {
        concatenate_lines(&self.lines)
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }
}

impl From<Vec<Line>> for LineSequence {
    fn from(lines: Vec<Line>) -> Self {
        Self { lines, offset: 0 }
    }
}
