// Changes the working directory, so this file holds a single test.
use pretty_assertions::assert_eq;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use whitespace_format::config::{FilesOptions, FormatOptions};
use whitespace_format::files::{self, FileSelector, FileStatus, Mode, Summary};
use whitespace_format::Formatter;

#[test]
fn test_directory_and_file_arguments_name_one_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "a  \n").unwrap();
    env::set_current_dir(temp_dir.path()).unwrap();

    let selector = FileSelector::new(&FilesOptions::default()).unwrap();
    let selection = selector.select(&[PathBuf::from("."), PathBuf::from("a.txt")]);
    assert!(selection.errors.is_empty());
    assert_eq!(selection.files, vec![PathBuf::from("a.txt")]);

    let formatter = Formatter::new(&FormatOptions {
        remove_trailing_whitespace: true,
        ..FormatOptions::default()
    })
    .unwrap();
    let outcomes = files::process_all(&selection.files, &formatter, Mode::Write);
    let summary = Summary::new(&outcomes, &selection.errors);
    assert_eq!(summary.formatted, 1);
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(outcomes[0].result.as_ref().unwrap().status, FileStatus::Formatted);
    assert_eq!(fs::read_to_string("a.txt").unwrap(), "a\n");

    let leftovers: Vec<_> = fs::read_dir(".").unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}
