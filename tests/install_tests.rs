//! Install command integration tests using the REAL ntpatch binary

mod common;

use common::TestTarget;
use predicates::prelude::*;
use std::collections::BTreeSet;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_install_with_defaults() {
    let target = TestTarget::with_patch_set();

    target
        .cmd()
        .args(["install", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created:"))
        .stdout(predicate::str::contains("Applied 2 of 2 overlay(s)"))
        .stdout(predicate::str::contains("Installation completed."))
        .stdout(predicate::str::contains("Backup: NTSource_backup_"))
        .stdout(predicate::str::contains("Safe mode: off"))
        .stdout(predicate::str::contains("Overlays: 2 of 2 applied"));

    assert_eq!(target.read_file("b.txt"), "b from O2");
    assert_eq!(target.read_file("c.txt"), "c from O2");
    assert_eq!(target.read_file("a.txt"), "original a");
    assert_eq!(
        target.read_file("NeotokyoSource/bin/client.dll"),
        "MZ patched client"
    );
    assert!(!target.file_exists("materials/safe.vmt"));
    assert_eq!(target.snapshots().len(), 1);
}

#[test]
fn test_install_writes_accurate_manifest() {
    let target = TestTarget::with_patch_set();
    target.write_config(
        "overlays:\n  - O1.zip\n  - Missing.zip\n  - O2.zip\nsafe_mode_overlay: SAFE.zip\n",
    );

    target
        .cmd()
        .args(["install", "-y", "--no-backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 2 of 3 overlay(s)"))
        .stdout(predicate::str::contains("Missing.zip"));

    let manifest = target.read_file("readme_patcher.txt");
    assert!(manifest.starts_with("NEOTOKYO Patch List:"));
    assert!(manifest.contains("  - O1.zip ("));
    assert!(manifest.contains("  - O2.zip ("));
    assert!(manifest.contains("  - Missing.zip: archive not found"));
    assert!(manifest.contains("FROM: https://bonahnsa.com/mods.html"));
    assert!(!manifest.contains("(SAFE MODE)"));
}

#[test]
fn test_install_safe_mode() {
    let target = TestTarget::with_patch_set();

    target
        .cmd()
        .args(["install", "-y", "--safe-mode", "--no-backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup: skipped"))
        .stdout(predicate::str::contains("Safe mode: on"));

    assert_eq!(target.read_file("materials/safe.vmt"), "safe");
    assert!(target.read_file("readme_patcher.txt").contains("(SAFE MODE)"));
}

#[test]
fn test_install_without_backup_creates_no_snapshot() {
    let target = TestTarget::with_patch_set();

    target
        .cmd()
        .args(["install", "--no-backup", "--no-safe-mode", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created:").not());

    assert!(target.snapshots().is_empty());
}

#[test]
fn test_install_rejects_unmarked_folder() {
    let target = TestTarget::named("neotokyo");
    target.write_file("a.txt", "untouched");
    target.write_asset("client.dll", b"MZ");

    target
        .cmd()
        .args(["install", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must contain 'NEOTOKYO'"));

    assert_eq!(target.files(), set(&["a.txt"]));
}

#[test]
fn test_install_missing_target() {
    let target = TestTarget::with_patch_set();

    target
        .cmd()
        .args(["install", "-y"])
        .env("NTPATCH_TARGET", target.temp.path().join("NEOTOKYO_missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Target directory not found"));
}

#[test]
fn test_install_missing_asset_changes_nothing() {
    let target = TestTarget::with_patch_set();
    std::fs::remove_file(target.resources.join("client.dll")).unwrap();

    target
        .cmd()
        .args(["install", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Required asset not found"));

    assert_eq!(target.files(), set(&["a.txt"]));
}

#[test]
fn test_install_missing_finalize_script_fails_after_overlays() {
    let target = TestTarget::with_patch_set();
    target.write_config("overlays:\n  - O2.zip\n");

    target
        .cmd()
        .args(["install", "-y", "--no-backup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("in extracted files"));

    assert!(target.file_exists("c.txt"));
    assert!(!target.file_exists("readme_patcher.txt"));
}

#[cfg(unix)]
#[test]
fn test_install_tolerates_failing_finalize_script() {
    let target = TestTarget::with_patch_set();
    target.create_overlay(
        "O1.zip",
        &[
            ("b.txt", "b from O1"),
            ("iconfix.sh", "echo ran > finalized.txt\nexit 3\n"),
        ],
    );

    target
        .cmd()
        .args(["install", "-y", "--no-backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("iconfix.sh returned with code 3"))
        .stdout(predicate::str::contains("Finalize script: finished with warnings"));

    assert!(target.file_exists("finalized.txt"));
    assert!(target.file_exists("readme_patcher.txt"));
}

#[test]
fn test_install_with_explicit_config_layer() {
    let target = TestTarget::with_patch_set();
    let extra = target.temp.path().join("only-o1.yaml");
    std::fs::write(&extra, "overlays:\n  - O1.zip\n").unwrap();

    target
        .cmd()
        .args(["install", "-y", "--no-backup", "--config"])
        .arg(&extra)
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 1 of 1 overlay(s)"));

    assert_eq!(target.read_file("b.txt"), "b from O1");
    assert!(!target.file_exists("c.txt"));
}

#[test]
fn test_install_missing_explicit_config() {
    let target = TestTarget::with_patch_set();

    target
        .cmd()
        .args(["install", "-y", "--config", "does-not-exist.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read configuration file"));

    assert_eq!(target.files(), set(&["a.txt"]));
}
