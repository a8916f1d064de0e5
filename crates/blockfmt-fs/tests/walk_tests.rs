use blockfmt_fs::{NormalizedPath, collect_files};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

fn fixture_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("docs/nested")).unwrap();
    fs::write(temp.path().join("main_test.go"), "package main\n").unwrap();
    fs::write(temp.path().join("docs/index.md"), "# docs\n").unwrap();
    fs::write(temp.path().join("docs/nested/guide.markdown"), "# guide\n").unwrap();
    fs::write(temp.path().join("docs/nested/usage.rst"), "usage\n").unwrap();
    temp
}

fn names(files: &[NormalizedPath]) -> Vec<String> {
    files
        .iter()
        .map(|f| f.file_name().unwrap().to_string())
        .collect()
}

#[test]
fn test_single_file_returned_as_is() {
    let temp = fixture_tree();
    let file = NormalizedPath::new(temp.path().join("main_test.go"));

    let files = collect_files(&file, Some("*.md")).unwrap();
    assert_eq!(files, vec![file]);
}

#[rstest]
#[case(None, vec!["index.md", "guide.markdown", "usage.rst", "main_test.go"])]
#[case(Some("*.markdown"), vec!["guide.markdown"])]
#[case(Some("*.go"), vec!["main_test.go"])]
#[case(Some(""), vec!["index.md", "guide.markdown", "usage.rst", "main_test.go"])]
fn test_directory_walk(#[case] pattern: Option<&str>, #[case] expected: Vec<&str>) {
    let temp = fixture_tree();
    let root = NormalizedPath::new(temp.path());

    let files = collect_files(&root, pattern).unwrap();
    assert_eq!(names(&files), expected);
}

#[test]
fn test_missing_path_is_error() {
    let result = collect_files(&NormalizedPath::new("/nonexistent/dir"), None);
    assert!(result.is_err());
}

#[test]
fn test_invalid_pattern_is_error() {
    let temp = fixture_tree();
    let result = collect_files(&NormalizedPath::new(temp.path()), Some("[*.md"));
    assert!(matches!(result, Err(blockfmt_fs::Error::Pattern { .. })));
}
