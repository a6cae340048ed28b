//! Binary smoke tests that never enter the TUI

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_flags() {
    Command::cargo_bin("userdeck")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--data-dir"))
        .stdout(predicate::str::contains("--offline"))
        .stdout(predicate::str::contains("--seed-url"));
}

#[test]
fn test_version() {
    Command::cargo_bin("userdeck")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_rejects_unknown_flag() {
    Command::cargo_bin("userdeck")
        .unwrap()
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bogus"));
}
