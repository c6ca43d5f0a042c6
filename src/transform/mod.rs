pub mod degenerate;
pub mod pipeline;
pub mod stages;

pub use degenerate::ContentClass;
pub use pipeline::Pipeline;

use crate::config::Config;
use crate::lines::LineSequence;
use crate::report::{ChangeLog, ChangeReport};

/// Result of formatting one file's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub content: String,
    pub class: ContentClass,
    pub report: ChangeReport,
}

impl Formatted {
    pub fn needs_formatting(&self) -> bool {
        self.report.needs_formatting()
    }
}

/// Format `content` with a freshly built pipeline
pub fn format(content: &str, config: &Config) -> Formatted {
    format_with(&Pipeline::new(config), content, config)
}

/// Format `content` with a pipeline built from the same `config`
pub fn format_with(pipeline: &Pipeline, content: &str, config: &Config) -> Formatted {
    let class = ContentClass::of(content);
    let mut changes = ChangeLog::new();

    let formatted = if class.is_degenerate() {
        degenerate::normalize(content, class, config, &mut changes)
    } else {
        pipeline
            .run(LineSequence::parse(content), config, &mut changes)
            .to_text()
    };

    tracing::debug!(?class, changes = changes.len(), "formatted content");
    Formatted {
        content: formatted,
        class,
        report: changes.into_report(),
    }
}
