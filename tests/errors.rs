use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn cargo_bin() -> Command { Command::cargo_bin("bfvm").unwrap() }

fn program_file(code: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(code.as_bytes()).unwrap();
    file
}

#[test]
fn test_unmatched_open_bracket_error() {
    let file = program_file("[+");
    cargo_bin()
        .timeout(Duration::from_secs(2)).arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("bracket"));
}

#[test]
fn test_unmatched_close_bracket_error() {
    let file = program_file("+]");
    cargo_bin()
        .timeout(Duration::from_secs(2)).arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("bracket"));
}

#[test]
fn test_missing_program_file_error() {
    cargo_bin()
        .timeout(Duration::from_secs(2)).arg("does-not-exist.bf")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to read program file"));
}

#[test]
fn test_missing_input_file_error() {
    let file = program_file(",.");
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg(file.path())
        .args(["--input", "does-not-exist.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to open input file"))
        // The program must never run when acquisition fails.
        .stdout(predicate::str::is_empty());
}
