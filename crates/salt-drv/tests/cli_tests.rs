//! End-to-end tests driving the `saltc` binary as a subprocess.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn saltc() -> Command {
    Command::cargo_bin("saltc").unwrap()
}

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp source file");
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn prints_help() {
    saltc().arg("--help").assert().success().stdout(predicate::str::contains("Usage"));
}

#[test]
fn prints_version() {
    saltc().arg("--version").assert().success().stdout(predicate::str::contains("saltc"));
}

#[test]
fn runs_a_source_file_and_prints_its_output() {
    let file = source_file("make int x 5\nmake int y 7\nprint \"sum=\" x + y");
    saltc().arg(file.path()).assert().success().stdout(predicate::eq("sum=12\n"));
}

#[test]
fn exits_nonzero_with_a_message_on_a_parse_error() {
    let file = source_file("make int 5 5");
    saltc().arg(file.path()).assert().failure().stderr(predicate::str::contains("error:"));
}

#[test]
fn exits_nonzero_on_a_missing_file() {
    saltc().arg("/no/such/file.salt").assert().failure();
}

#[test]
fn runs_the_while_with_end_scenario() {
    let file = source_file(
        "make int i 0\nwhile i lt 100 { if i eq 3 { end } print i make i i + 1 }",
    );
    saltc()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("0\n1\n2\n"));
}
