//! Argument handling of the `timemeup` binary.
//!
//! Only paths that exit on their own are exercised here; `run` waits for
//! terminal input and is covered by the library tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn timemeup() -> Command {
    Command::cargo_bin("timemeup").unwrap()
}

#[test]
fn test_no_subcommand_prints_help() {
    timemeup()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_version() {
    timemeup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_run_help_lists_options() {
    timemeup()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--count-up"))
        .stdout(predicate::str::contains("--display"))
        .stdout(predicate::str::contains("--no-sound"));
}

#[test]
fn test_hours_out_of_range_rejected() {
    timemeup()
        .args(["run", "--hours", "24"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("24"));
}

#[test]
fn test_minutes_out_of_range_rejected() {
    timemeup()
        .args(["run", "--minutes", "60"])
        .assert()
        .failure();
}

#[test]
fn test_unknown_display_rejected() {
    timemeup()
        .args(["run", "--display", "dock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("menu-bar"));
}

#[test]
fn test_completions_bash() {
    timemeup()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timemeup"));
}
