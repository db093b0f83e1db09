//! Backup and restore integration tests using the REAL ntpatch binary

mod common;

use common::TestTarget;
use predicates::prelude::*;
use std::collections::BTreeSet;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_install_then_restore_round_trip() {
    let target = TestTarget::with_patch_set();

    target.cmd().args(["install", "-y"]).assert().success();

    let snapshots = target.snapshots();
    assert_eq!(snapshots.len(), 1);
    let snapshot = snapshots[0].clone();

    let mut patched = set(&[
        "a.txt",
        "b.txt",
        "c.txt",
        "iconfix.bat",
        "iconfix.sh",
        "readme_patcher.txt",
        "NeotokyoSource/bin/client.dll",
    ]);
    patched.insert(snapshot.clone());
    assert_eq!(target.files(), patched);
    assert_eq!(target.read_file("b.txt"), "b from O2");

    target
        .cmd()
        .args(["restore", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored from"))
        .stdout(predicate::str::contains(snapshot.as_str()));

    let mut restored = set(&["a.txt"]);
    restored.insert(snapshot);
    assert_eq!(target.files(), restored);
    assert_eq!(target.read_file("a.txt"), "original a");
    assert!(!target.file_exists("NeotokyoSource"));
}

#[test]
fn test_restore_keep_extra_only_overwrites() {
    let target = TestTarget::new();
    target.write_file("a.txt", "original a");
    target.cmd().arg("backup").assert().success();

    target.write_file("a.txt", "changed");
    target.write_file("added.txt", "new");

    target
        .cmd()
        .args(["restore", "-y", "--keep-extra"])
        .assert()
        .success();

    assert_eq!(target.read_file("a.txt"), "original a");
    assert_eq!(target.read_file("added.txt"), "new");
}

#[test]
fn test_restore_without_backups_changes_nothing() {
    let target = TestTarget::new();
    target.write_file("a.txt", "original a");
    target.write_file("NT-IconFix.zip", "an overlay, not a backup");

    target
        .cmd()
        .args(["restore", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No backup files found"));

    assert_eq!(target.files(), set(&["NT-IconFix.zip", "a.txt"]));
    assert_eq!(target.read_file("a.txt"), "original a");
}

#[test]
fn test_restore_picks_newest_backup() {
    let target = TestTarget::new();
    common::write_zip(
        &target.path.join("NTSource_backup_20230101_120000.zip"),
        &[("a.txt", "older")],
    );
    common::write_zip(
        &target.path.join("NTSource_backup_20240115_143000.zip"),
        &[("a.txt", "newer")],
    );
    common::write_zip(
        &target.path.join("NTSource_backup_20231231_235959.zip"),
        &[("a.txt", "middle")],
    );

    target
        .cmd()
        .args(["restore", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NTSource_backup_20240115_143000.zip"));

    assert_eq!(target.read_file("a.txt"), "newer");
    assert_eq!(target.snapshots().len(), 3);
}

#[test]
fn test_restore_corrupt_backup() {
    let target = TestTarget::new();
    target.write_file("a.txt", "original a");
    target.write_file("NTSource_backup_20240115_143000.zip", "not a zip");

    target
        .cmd()
        .args(["restore", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"));

    assert_eq!(target.read_file("a.txt"), "original a");
}

#[test]
fn test_backup_excludes_previous_backups() {
    let target = TestTarget::new();
    target.write_file("a.txt", "original a");
    target.write_file("cfg/config.cfg", "rate 30000");
    common::write_zip(
        &target.path.join("NTSource_backup_20200101_000000.zip"),
        &[("stale.txt", "stale")],
    );

    target
        .cmd()
        .arg("backup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created:"))
        .stdout(predicate::str::contains("(2 files)"));

    assert_eq!(target.snapshots().len(), 2);
}

#[test]
fn test_backups_lists_newest_first() {
    let target = TestTarget::new();
    common::write_zip(
        &target.path.join("NTSource_backup_20230101_120000.zip"),
        &[("a.txt", "older")],
    );
    common::write_zip(
        &target.path.join("NTSource_backup_20240115_143000.zip"),
        &[("a.txt", "newer")],
    );

    let output = target
        .cmd()
        .args(["backups", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let listed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["file_name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "NTSource_backup_20240115_143000.zip",
            "NTSource_backup_20230101_120000.zip"
        ]
    );
    assert_eq!(listed[0]["taken_at"], "2024-01-15 14:30:00");
}

#[test]
fn test_backups_empty() {
    let target = TestTarget::new();

    target
        .cmd()
        .arg("backups")
        .assert()
        .success()
        .stdout(predicate::str::contains("No backups found"));
}
