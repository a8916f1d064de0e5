#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use blockfmt_format::{Error, Formatter, TerraformFormatter, VerbFormatter};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Stand-in for terraform: normalizes spacing around the first `=` of each
/// line and fails on lines containing `INVALID`.
const FAKE_TERRAFORM: &str = r#"#!/bin/sh
if [ "$1" = "version" ]; then
  echo "Terraform v1.5.7"
  echo "on linux_amd64"
  exit 0
fi
sed -e 's/[[:space:]]*=[[:space:]]*/ = /' | awk '
  /INVALID/ { print "Error: Invalid expression on line " NR > "/dev/stderr"; bad = 1 }
  { print }
  END { exit bad }
'
"#;

fn fake_terraform() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("terraform");
    std::fs::write(&path, FAKE_TERRAFORM).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    (dir, path)
}

#[test]
fn test_format_pipes_block_through_program() {
    let (_dir, program) = fake_terraform();
    let formatter = TerraformFormatter::new(&program);

    let formatted = formatter
        .format("resource \"a\" \"b\" {\n  name   =\"x\"\n}\n")
        .unwrap();

    assert_eq!(formatted, "resource \"a\" \"b\" {\n  name = \"x\"\n}\n");
}

#[test]
fn test_format_failure_carries_stderr() {
    let (_dir, program) = fake_terraform();
    let formatter = TerraformFormatter::new(&program);

    let err = formatter.format("a = 1\nb = INVALID\n").unwrap_err();

    match err {
        Error::CommandFailed { code, stderr, .. } => {
            assert_eq!(code, 1);
            assert_eq!(stderr, "Error: Invalid expression on line 2");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_version_reports_first_line() {
    let (_dir, program) = fake_terraform();
    let version = TerraformFormatter::new(&program).version().unwrap();
    assert_eq!(version, "Terraform v1.5.7");
}

#[test]
fn test_verb_formatter_over_program() {
    let (_dir, program) = fake_terraform();
    let formatter = VerbFormatter::new(TerraformFormatter::new(&program));

    let formatted = formatter
        .format("resource \"a\" \"%s\" {\n  name   =   %[2]q\n  count=%d\n}\n")
        .unwrap();

    assert_eq!(
        formatted,
        "resource \"a\" \"%s\" {\n  name = %[2]q\n  count = %d\n}\n"
    );
}

#[test]
fn test_large_block_does_not_deadlock() {
    let (_dir, program) = fake_terraform();
    let formatter = TerraformFormatter::new(&program);
    let block: String = (0..20_000).map(|i| format!("key_{i} = {i}\n")).collect();

    let formatted = formatter.format(&block).unwrap();

    assert_eq!(formatted, block);
}
