#![cfg(unix)]

mod common;

use common::{todays_serial, zone, TestRepo};

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn first_commit_with_legacy_serial_passes() {
    let repo = TestRepo::new();
    repo.stage("db.example.com", &zone("example.com", 2_024_010_100, "example.com."));
    repo.stage("notes.txt", "not a zone\n");
    repo.commit("initial");
    let config = repo.config(&repo.checker_stub("exit 0"), "pipeline-run");

    let output = repo.zonegate(&config).assert().success().get_output().clone();
    let log = stderr(&output);
    assert!(log.contains("1 file(s) detected"), "{log}");
    assert!(log.contains("Checking zonefile db.example.com"), "{log}");
    assert!(log.contains("Serial format OK"), "{log}");
}

#[test]
fn first_commit_with_bad_serial_fails() {
    let repo = TestRepo::new();
    repo.stage("db.example.com", &zone("example.com", 42, "example.com."));
    repo.commit("initial");
    let config = repo.config(&repo.checker_stub("exit 0"), "pipeline-run");

    let output = repo.zonegate(&config).assert().code(1).get_output().clone();
    assert!(stderr(&output).contains("Bad serial number format: 42"));
}

#[test]
fn checker_receives_zone_name_and_checked_out_path() {
    let repo = TestRepo::new();
    repo.stage("db.example.com", &zone("example.com", 2_024_010_100, "example.com."));
    repo.commit("initial");
    let expected = format!("-k fail example.com {}", repo.root.join("db.example.com").display());
    let checker = repo.checker_stub(&format!(
        r#"[ "$*" = "{expected}" ] || {{ echo "unexpected arguments: $*" >&2; exit 2; }}"#
    ));
    let config = repo.config(&checker, "pipeline-run");

    repo.zonegate(&config).assert().success();
}

#[test]
fn checker_rejection_fails_and_skips_serial() {
    let repo = TestRepo::new();
    repo.stage("db.example.com", &zone("example.com", 42, "example.com."));
    repo.commit("initial");
    let checker = repo.checker_stub("echo 'zone example.com/IN: NS has no address records' >&2; exit 1");
    let config = repo.config(&checker, "pipeline-run");

    let output = repo.zonegate(&config).assert().code(1).get_output().clone();
    let log = stderr(&output);
    assert!(log.contains("NS has no address records"), "{log}");
    assert!(!log.contains("serial number format"), "{log}");
}

#[test]
fn hook_accepts_incremented_serial() {
    let repo = TestRepo::new();
    repo.stage("db.example.com", &zone("example.com", todays_serial(0), "example.com."));
    repo.commit("initial");
    repo.stage("db.example.com", &zone("example.com", todays_serial(1), "example.com."));
    let config = repo.config(&repo.checker_stub("exit 0"), "local-hook");

    let output = repo.zonegate(&config).assert().success().get_output().clone();
    let log = stderr(&output);
    assert!(log.contains("1 changed file(s) detected"), "{log}");
    assert!(log.contains("Serial number incrementation OK"), "{log}");
}

#[test]
fn hook_rejects_unchanged_serial() {
    let repo = TestRepo::new();
    repo.stage("db.example.com", &zone("example.com", todays_serial(5), "example.com."));
    repo.commit("initial");
    let mut changed = zone("example.com", todays_serial(5), "example.com.");
    changed.push_str("www IN A 192.0.2.80\n");
    repo.stage("db.example.com", &changed);
    let config = repo.config(&repo.checker_stub("exit 0"), "local-hook");

    let output = repo.zonegate(&config).assert().code(1).get_output().clone();
    assert!(stderr(&output).contains("Serial number was not incremented"));
}

#[test]
fn pipeline_checks_last_commit_against_parent() {
    let repo = TestRepo::new();
    repo.stage("db.example.com", &zone("example.com", 2_020_010_100, "example.com."));
    repo.stage("db.example.net", &zone("example.net", 2_020_010_100, "example.net"));
    repo.commit("initial");
    repo.stage("db.example.com", &zone("example.com", todays_serial(0), "example.com."));
    repo.commit("bump");
    let config = repo.config(&repo.checker_stub("exit 0"), "pipeline-run");

    // db.example.net has a relative $ORIGIN but isn't part of the last commit.
    let output = repo.zonegate(&config).assert().success().get_output().clone();
    let log = stderr(&output);
    assert!(log.contains("1 changed file(s) detected"), "{log}");
    assert!(!log.contains("db.example.net"), "{log}");
}

#[test]
fn relative_origin_fails() {
    let repo = TestRepo::new();
    repo.stage("db.example.com", &zone("example.com", 2_024_010_100, "example.com"));
    repo.commit("initial");
    let config = repo.config(&repo.checker_stub("exit 0"), "pipeline-run");

    let output = repo.zonegate(&config).assert().code(1).get_output().clone();
    assert!(stderr(&output).contains("No trailing \".\" at $ORIGIN example.com"));
}

#[test]
fn unparsable_zone_aborts() {
    let repo = TestRepo::new();
    repo.stage("db.example.com", "www IN A 192.0.2.1\n");
    repo.commit("initial");
    let config = repo.config(&repo.checker_stub("exit 0"), "pipeline-run");

    let output = repo.zonegate(&config).assert().code(1).get_output().clone();
    assert!(stderr(&output).contains("failed to parse zone name"));
}

#[test]
fn outside_a_repository_fails() {
    let repo = TestRepo::new();
    let config = repo.config(&repo.checker_stub("exit 0"), "pipeline-run");

    let output = assert_cmd::Command::cargo_bin("zonegate")
        .unwrap()
        .current_dir(&repo.aux)
        .arg(&config)
        .assert()
        .code(1)
        .get_output()
        .clone();
    assert!(stderr(&output).contains("not inside a git repository"));
}
