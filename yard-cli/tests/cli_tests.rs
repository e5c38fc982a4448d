//! Integration tests for the `yard` binary
//!
//! These run the built executable and check exit codes and output streams.

use std::fs;
use std::process::{Command, Output};

fn yard(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yard"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_convert_prints_postfix() {
    let output = yard(&["convert", "a(b|c)d"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("abc|.d."));
}

#[test]
fn test_convert_strict_rejects_unmatched_paren() {
    let output = yard(&["convert", "--strict", "(a"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error:"));
    assert!(stderr(&output).contains("malformed pattern"));
    assert!(!stdout(&output).contains("Postfix:"));
}

#[test]
fn test_convert_lenient_reports_recovery() {
    let output = yard(&["convert", "(a"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("a("));
    assert!(out.contains("recovered:"));
}

#[test]
fn test_convert_debug_shows_infix_stage() {
    let output = yard(&["convert", "--debug", "ab"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Infix tokens:  a . b"));
}

#[test]
fn test_file_missing_path_fails() {
    let output = yard(&["file", "/no/such/path"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error:"));
    assert!(stderr(&output).contains("failed to read '/no/such/path'"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_file_converts_single_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pattern.txt");
    fs::write(&path, "  (a|b)*c \n").unwrap();

    let output = yard(&["file", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("ab|*c."));
}

#[test]
fn test_file_blank_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pattern.txt");
    fs::write(&path, "\n  \n").unwrap();

    let output = yard(&["file", "--lines", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no pattern to convert"));
}

#[test]
fn test_file_lines_lenient_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pattern.txt");
    fs::write(&path, "ab\n\n(a\n").unwrap();

    let output = yard(&["file", "--lines", path.to_str().unwrap()]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("[line 1] ab => ab."));
    assert!(out.contains("[line 3] (a => a("));
}

#[test]
fn test_file_lines_strict_fails_on_any_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pattern.txt");
    fs::write(&path, "ab\n(a\n").unwrap();

    let output = yard(&["file", "--lines", "--strict", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    // the good line is still converted
    assert!(out.contains("[line 1] ab => ab."));
    assert!(out.contains("[line 2] (a => malformed pattern"));
}

#[test]
fn test_tokens_shows_spans() {
    let output = yard(&["tokens", "[ab]c"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Found 3 token(s)"));
    assert!(out.contains("0..4, 4 char(s)"));
    assert!(out.contains("inserted"));
}

#[test]
fn test_balance_unclosed_exits_one() {
    let output = yard(&["balance", "(a"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Not balanced"));
}

#[test]
fn test_balance_accepts_balanced_expression() {
    let output = yard(&["balance", "{[(a|b)*]}"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Balanced"));
}

#[test]
fn test_balance_file_reports_each_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pattern.txt");
    fs::write(&path, "(a)\n[b\n").unwrap();

    let output = yard(&["balance", "--file", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Line 1:"));
    assert!(out.contains("Line 2:"));
}

#[test]
fn test_balance_file_missing_fails() {
    let output = yard(&["balance", "--file", "/no/such/path"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error:"));
}
