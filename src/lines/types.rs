use serde::Serialize;
use std::fmt;

/// Line terminator found at the end of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminator {
    /// Only the last line of a file may lack a terminator
    None,
    Lf,
    Cr,
    CrLf,
}

impl Terminator {
    pub fn as_str(self) -> &'static str {
        match self {
            Terminator::None => "",
            Terminator::Lf => "\n",
            Terminator::Cr => "\r",
            Terminator::CrLf => "\r\n",
        }
    }

    pub fn is_none(self) -> bool {
        self == Terminator::None
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Terminator::None => "none",
            Terminator::Lf => "\\n",
            Terminator::Cr => "\\r",
            Terminator::CrLf => "\\r\\n",
        };
        f.write_str(name)
    }
}

/// One line of a text file, split into its content and its terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub content: String,
    pub terminator: Terminator,
}

impl Line {
    pub fn new(content: impl Into<String>, terminator: Terminator) -> Self {
        Self {
            content: content.into(),
            terminator,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// A line that contributes no bytes at all
    pub fn is_dummy(&self) -> bool {
        self.content.is_empty() && self.terminator.is_none()
    }

    pub fn push_to(&self, out: &mut String) {
        out.push_str(&self.content);
        out.push_str(self.terminator.as_str());
    }
}
