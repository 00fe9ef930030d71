use std::fs::{create_dir_all, read_to_string, write};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn local_conversion_happy_flow_writes_markdown() {
    let tmp = tempdir().unwrap();
    let repo = tmp.path().join("cli-sample");
    create_dir_all(repo.join("src")).unwrap();
    write(repo.join("src/app.py"), "print('cli')\n").unwrap();
    write(repo.join("README.md"), "# ignored\n").unwrap();

    let out = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("repo2md").expect("Binary exists");
    cmd.arg("local")
        .arg("--source")
        .arg(&repo)
        .arg("--destination")
        .arg(out.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Converted 'cli-sample'"));

    let markdown = read_to_string(out.path().join("cli-sample.md")).unwrap();
    assert!(markdown.starts_with("## Contents:"));
    assert!(markdown.contains("###### cli-sample/src/app.py"));
    assert!(!markdown.contains("README.md"));
}

#[test]
fn missing_source_path_fails_before_writing_output() {
    let out = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("repo2md").expect("Binary exists");
    cmd.arg("local")
        .arg("--source")
        .arg("/definitely/not/here")
        .arg("--destination")
        .arg(out.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn unsupported_language_is_reported_as_configuration_error() {
    let tmp = tempdir().unwrap();
    let repo = tmp.path().join("langless");
    create_dir_all(&repo).unwrap();
    write(repo.join("a.cob"), "x\n").unwrap();

    let out = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("repo2md").expect("Binary exists");
    cmd.arg("local")
        .arg("--source")
        .arg(&repo)
        .arg("--language")
        .arg("cobol")
        .arg("--destination")
        .arg(out.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}
