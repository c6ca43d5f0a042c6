use crate::config::Config;
use crate::lines::{LineSequence, MarkerCounts};
use crate::report::ChangeLog;

use super::stages::{
    Context, EndOfFile, EndOfFileStage, LeadingEmptyLinesStage, NewLineMarkerStage,
    NonStandardWhitespaceStage, Stage, TabStage, TrailingEmptyLinesStage, TrailingWhitespaceStage,
};

/// Fixed, ordered sequence of line stages.
///
/// The order matters: tabs are expanded after non-standard whitespace is
/// handled, trailing whitespace is stripped after tab expansion, and emptiness
/// of lines is judged only after all content stages have run.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(config: &Config) -> Self {
        let end_of_file = if config.add_new_line_marker_at_end_of_file() {
            EndOfFile::Add
        } else if config.remove_new_line_marker_from_end_of_file() {
            EndOfFile::Remove
        } else {
            EndOfFile::Keep
        };

        let stages: Vec<Box<dyn Stage>> = vec![
            Box::new(NonStandardWhitespaceStage {
                mode: config.normalize_non_standard_whitespace(),
            }),
            Box::new(TabStage {
                spaces: config.replace_tabs_with_spaces(),
            }),
            Box::new(TrailingWhitespaceStage {
                enabled: config.remove_trailing_whitespace(),
            }),
            Box::new(NewLineMarkerStage {
                enabled: config.normalize_new_line_markers(),
            }),
            Box::new(LeadingEmptyLinesStage {
                enabled: config.remove_leading_empty_lines(),
            }),
            Box::new(TrailingEmptyLinesStage {
                enabled: config.remove_trailing_empty_lines(),
            }),
            Box::new(EndOfFileStage { mode: end_of_file }),
        ];

        Self { stages }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage over `lines`, resolving the target terminator from the
    /// terminators the file had before any stage ran
    pub fn run(
        &self,
        lines: LineSequence,
        config: &Config,
        changes: &mut ChangeLog,
    ) -> LineSequence {
        let counts = MarkerCounts::from_lines(lines.lines());
        let context = Context {
            target: config.new_line_marker().resolve(&counts),
        };
        tracing::trace!(?counts, target = ?context.target, "resolved new line marker");

        let mut lines = lines;
        for stage in &self.stages {
            let before = changes.len();
            lines = stage.apply(lines, &context, changes);
            // A last line left with no content and no terminator is not a line
            lines.drop_dummy_tail();
            tracing::trace!(stage = stage.name(), changes = changes.len() - before, "stage done");
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormatOptions;
    use crate::validation::ConfigValidator;

    fn run(text: &str, options: FormatOptions) -> String {
        let config = ConfigValidator::validate(&options).unwrap();
        let mut changes = ChangeLog::new();
        Pipeline::new(&config)
            .run(LineSequence::parse(text), &config, &mut changes)
            .to_text()
    }

    #[test]
    fn test_stage_order() {
        let pipeline = Pipeline::new(&Config::default());
        assert_eq!(
            pipeline.stage_names(),
            vec![
                "non-standard-whitespace",
                "tabs",
                "trailing-whitespace",
                "new-line-markers",
                "leading-empty-lines",
                "trailing-empty-lines",
                "end-of-file",
            ]
        );
    }

    #[test]
    fn test_disabled_pipeline_is_identity() {
        for text in ["a", "a \t\n\n", "\r\n\r\nx\r", " \x0b\tx\x0c \n\n"] {
            assert_eq!(run(text, FormatOptions::default()), text);
        }
    }

    #[test]
    fn test_emptied_last_line_gets_no_terminator() {
        let options = FormatOptions {
            remove_trailing_whitespace: true,
            add_new_line_marker_at_end_of_file: true,
            ..FormatOptions::default()
        };
        assert_eq!(run("x\n   ", options), "x\n");
    }

    #[test]
    fn test_expanded_tabs_are_trailing_whitespace() {
        let options = FormatOptions {
            replace_tabs_with_spaces: 4,
            remove_trailing_whitespace: true,
            ..FormatOptions::default()
        };
        assert_eq!(run("\tx\t\n", options), "    x\n");
    }

    #[test]
    fn test_whitespace_lines_become_empty_before_removal() {
        let options = FormatOptions {
            remove_trailing_whitespace: true,
            remove_leading_empty_lines: true,
            remove_trailing_empty_lines: true,
            ..FormatOptions::default()
        };
        assert_eq!(run("  \n\t\nx\n \x0c\n", options), "x\n");
    }

    #[test]
    fn test_auto_marker_uses_original_majority() {
        let options = FormatOptions {
            normalize_new_line_markers: true,
            add_new_line_marker_at_end_of_file: true,
            ..FormatOptions::default()
        };
        assert_eq!(run("a\r\nb\r\nc\nd", options), "a\r\nb\r\nc\r\nd\r\n");
    }
}
