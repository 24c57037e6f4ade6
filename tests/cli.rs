mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("susidx").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("susidx"));
}

#[test]
fn build_writes_index_and_stats() {
    let dir = tempdir().unwrap();
    common::write_fixture(dir.path());
    let out = dir.path().join("OUT").join("sustainability_index.csv");

    let mut cmd = Command::cargo_bin("susidx").unwrap();
    cmd.arg("build")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--out")
        .arg(&out)
        .arg("--stats");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Saved 4 rows"))
        .stdout(predicate::str::contains("score"));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("isoA3,"));
    assert_eq!(text.lines().count(), 5);
}

#[test]
fn json_output_inferred_from_extension() {
    let dir = tempdir().unwrap();
    common::write_fixture(dir.path());
    let out = dir.path().join("index.json");

    let mut cmd = Command::cargo_bin("susidx").unwrap();
    cmd.args(["build", "--with-normalized", "--data-dir"])
        .arg(dir.path())
        .arg("--out")
        .arg(&out);
    cmd.assert().success();

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 4);
    assert!(v[0].get("hdi_n").is_some());
}

#[test]
fn bad_input_fails_without_output() {
    let dir = tempdir().unwrap();
    common::write_fixture(dir.path());
    std::fs::write(dir.path().join("life_expectancy.csv"), "a,b\n1,2\n").unwrap();
    let out = dir.path().join("index.csv");

    let mut cmd = Command::cargo_bin("susidx").unwrap();
    cmd.arg("build")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--out")
        .arg(&out);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("life_expectancy.csv"));
    assert!(!out.exists());
}
