use whitespace_format::config::{FormatOptions, NewLineMarker};
use whitespace_format::report::{diff_lines, visible, DiffLine};
use whitespace_format::Formatter;

fn render_diff(original: &str, formatted: &str) -> String {
    diff_lines(original, formatted)
        .iter()
        .map(|entry| match entry {
            DiffLine::Same { old, line, .. } => format!("  {} {}", old, visible(line)),
            DiffLine::Removed { old, line } => format!("- {} {}", old, visible(line)),
            DiffLine::Added { new, line } => format!("+ {} {}", new, visible(line)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_report_rendering() {
    let formatter = Formatter::new(&FormatOptions {
        new_line_marker: NewLineMarker::Linux,
        add_new_line_marker_at_end_of_file: true,
        remove_trailing_whitespace: true,
        remove_leading_empty_lines: true,
        replace_tabs_with_spaces: 2,
        ..FormatOptions::default()
    })
    .unwrap();

    let formatted = formatter.format("\n\tfoo  \nbar\t\nbaz");
    assert_eq!(formatted.content, "  foo\nbar\nbaz\n");

    insta::assert_snapshot!(formatted.report.to_string().trim_end(), @r"
line 1: removed leading empty line
line 2: replaced tabs with spaces
line 2: removed trailing whitespace
line 3: replaced tabs with spaces
line 3: removed trailing whitespace
line 4: added new line marker at end of file
");
}

#[test]
fn test_report_json() {
    let formatter = Formatter::new(&FormatOptions {
        remove_trailing_whitespace: true,
        ..FormatOptions::default()
    })
    .unwrap();

    let formatted = formatter.format("ok\nnot ok \n");
    let json = serde_json::to_string(&formatted.report).unwrap();
    insta::assert_snapshot!(json, @r#"[{"kind":"removed_trailing_whitespace","line":2}]"#);
}

#[test]
fn test_file_level_report() {
    let formatter = Formatter::new(&FormatOptions {
        normalize_whitespace_only_files: whitespace_format::config::DegenerateFileMode::Empty,
        ..FormatOptions::default()
    })
    .unwrap();

    let formatted = formatter.format("\t\n");
    insta::assert_snapshot!(
        formatted.report.to_string().trim_end(),
        @"file: replaced whitespace-only file"
    );
}

#[test]
fn test_diff_rendering() {
    let original = "a  \nb\r\n\tc";
    let formatter = Formatter::new(&FormatOptions {
        new_line_marker: NewLineMarker::Linux,
        normalize_new_line_markers: true,
        add_new_line_marker_at_end_of_file: true,
        remove_trailing_whitespace: true,
        ..FormatOptions::default()
    })
    .unwrap();
    let formatted = formatter.format(original);
    assert_eq!(formatted.content, "a\nb\n\tc\n");

    insta::assert_snapshot!(render_diff(original, &formatted.content), @r"
- 1 a··\n
- 2 b\r\n
- 3 \tc
+ 1 a\n
+ 2 b\n
+ 3 \tc\n
");
}
