use super::{Line, Terminator};

/// Frequency of each line terminator kind in a piece of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerCounts {
    pub lf: usize,
    pub cr: usize,
    pub crlf: usize,
}

impl MarkerCounts {
    pub fn from_lines(lines: &[Line]) -> Self {
        let mut counts = Self::default();
        for line in lines {
            counts.record(line.terminator);
        }
        counts
    }

    pub fn record(&mut self, terminator: Terminator) {
        match terminator {
            Terminator::Lf => self.lf += 1,
            Terminator::Cr => self.cr += 1,
            Terminator::CrLf => self.crlf += 1,
            Terminator::None => {}
        }
    }

    /// The most frequent terminator. Ties go to LF, then CRLF, then CR, and a
    /// text without any terminator yields LF.
    pub fn most_common(&self) -> Terminator {
        let ranked = [
            (self.lf, Terminator::Lf),
            (self.crlf, Terminator::CrLf),
            (self.cr, Terminator::Cr),
        ];

        let mut best = ranked[0];
        for candidate in &ranked[1..] {
            if candidate.0 > best.0 {
                best = *candidate;
            }
        }
        best.1
    }
}
