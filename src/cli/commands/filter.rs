use anyhow::Result;
use std::io::{self, Read, Write};
use std::path::Path;

use super::load_formatter;
use crate::cli::FormatArgs;
use whitespace_format::error::{ErrorContext, FormatError};

const STDIN: &str = "<stdin>";

pub fn handle(options: &FormatArgs) -> Result<i32> {
    let (formatter, _) = load_formatter(options)?;

    let mut bytes = Vec::new();
    io::stdin().read_to_end(&mut bytes).read_context(STDIN)?;
    let content = String::from_utf8(bytes).map_err(|source| FormatError::Decode {
        path: Path::new(STDIN).to_path_buf(),
        source,
    })?;

    let formatted = formatter.format(&content);
    tracing::debug!(changes = formatted.report.len(), "filtered standard input");

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(formatted.content.as_bytes())
        .and_then(|()| stdout.flush())
        .write_context("<stdout>")?;

    Ok(0)
}
