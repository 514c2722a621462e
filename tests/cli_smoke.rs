mod common;

use assert_cmd::prelude::*;
use chrono::{TimeZone, Utc};
use common::{commit_file, git, has_git, init_git_repo};
use fmtchurn::cache::Cache;
use fmtchurn::model::Release;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn help_lists_subcommands() {
    let out = Command::cargo_bin("fmtchurn")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    for sub in ["clone", "releases", "run", "report", "loc", "validate"] {
        assert!(text.contains(sub), "missing {sub} in help");
    }
}

#[test]
fn unknown_project_is_rejected() {
    let dir = tempdir().unwrap();
    let out = Command::cargo_bin("fmtchurn")
        .unwrap()
        .arg("--root")
        .arg(dir.path())
        .args(["loc", "no-such-project"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8_lossy(&out).contains("no-such-project"));
}

#[test]
fn start_requires_days() {
    Command::cargo_bin("fmtchurn")
        .unwrap()
        .args(["report", "flask", "black", "--start", "2020-01-01"])
        .assert()
        .failure();
}

#[test]
fn clone_copies_repo_and_writes_archive() {
    if !has_git() {
        return;
    }
    let upstream = tempdir().unwrap();
    init_git_repo(upstream.path());
    commit_file(upstream.path(), "pkg/__init__.py", "x = 1\n");

    let root = tempdir().unwrap();
    let run = || {
        Command::cargo_bin("fmtchurn")
            .unwrap()
            .arg("--root")
            .arg(root.path())
            .arg("--url")
            .arg(upstream.path())
            .args(["clone", "demo"])
            .assert()
            .success();
    };
    run();
    // A second clone is a no-op on the checkout.
    run();

    let checkout = root.path().join("projects").join("demo");
    assert!(checkout.join("pkg/__init__.py").is_file());
    assert_eq!(git(&checkout, &["rev-parse", "--abbrev-ref", "HEAD"]), "master");

    let archive = root.path().join("projects").join("demo.tar");
    let listing = Command::new("tar").arg("-tf").arg(&archive).output().unwrap();
    assert!(listing.status.success());
    assert!(String::from_utf8_lossy(&listing.stdout).contains("pkg/__init__.py"));
}

#[test]
fn releases_are_served_from_cache() {
    let root = tempdir().unwrap();
    let mut cache = Cache::new(root.path().join(".fmtchurn")).unwrap();
    cache
        .store_releases(
            "yapf",
            &[
                Release::new("yapf", "0.2.0", Utc.with_ymd_and_hms(2015, 3, 20, 0, 0, 0).unwrap()),
                Release::new("yapf", "0.1", Utc.with_ymd_and_hms(2015, 3, 19, 0, 0, 0).unwrap()),
            ],
        )
        .unwrap();
    drop(cache);

    // An unreachable index proves nothing is fetched.
    let out = Command::cargo_bin("fmtchurn")
        .unwrap()
        .arg("--root")
        .arg(root.path())
        .args(["--index-url", "http://127.0.0.1:9/pypi"])
        .args(["releases", "yapf", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let versions: Vec<&str> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["version"].as_str().unwrap())
        .collect();
    assert_eq!(versions, ["0.1", "0.2.0"]);
}
