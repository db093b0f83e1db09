//! Common test utilities for ntpatch integration tests

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Finalize scripts shipped in the first overlay, one per platform
pub const FINALIZE_SCRIPTS: [(&str, &str); 2] = [
    ("iconfix.bat", "@echo off\r\nexit /b 0\r\n"),
    ("iconfix.sh", "exit 0\n"),
];

/// A marker-named installation folder plus a resource bundle
#[allow(dead_code)]
pub struct TestTarget {
    /// Temporary directory
    pub temp: TempDir,
    /// Installation folder (`.../NEOTOKYO`)
    pub path: PathBuf,
    /// Resource bundle directory
    pub resources: PathBuf,
    /// Isolated global configuration directory
    pub config_home: PathBuf,
}

#[allow(dead_code)]
impl TestTarget {
    /// Create an empty target and an empty resource bundle
    pub fn new() -> Self {
        Self::named("NEOTOKYO")
    }

    /// Create a target folder with a specific name
    pub fn named(name: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join(name);
        let resources = temp.path().join("resources");
        let config_home = temp.path().join("config-home");
        for dir in [&path, &resources, &config_home] {
            fs::create_dir_all(dir).expect("Failed to create directory");
        }
        Self {
            temp,
            path,
            resources,
            config_home,
        }
    }

    /// Target with `a.txt` and a bundle of two overlays, a safe-mode overlay
    /// and the privileged asset
    ///
    /// O1 adds `b.txt` and the finalize scripts; O2 overwrites `b.txt` and
    /// adds `c.txt`.
    pub fn with_patch_set() -> Self {
        let target = Self::new();
        target.write_file("a.txt", "original a");
        target.write_config(
            "overlays:\n  - O1.zip\n  - O2.zip\nsafe_mode_overlay: SAFE.zip\n",
        );
        target.write_asset("client.dll", b"MZ patched client");

        let mut o1 = vec![("b.txt", "b from O1")];
        o1.extend(FINALIZE_SCRIPTS);
        target.create_overlay("O1.zip", &o1);
        target.create_overlay("O2.zip", &[("b.txt", "b from O2"), ("c.txt", "c from O2")]);
        target.create_overlay("SAFE.zip", &[("materials/safe.vmt", "safe")]);
        target
    }

    /// Write a file in the target
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the target
    pub fn read_file(&self, path: &str) -> String {
        fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the target
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write `ntpatch.yaml` into the resource bundle
    pub fn write_config(&self, yaml: &str) {
        fs::write(self.resources.join("ntpatch.yaml"), yaml).expect("Failed to write config");
    }

    /// Write a raw file into the resource bundle
    pub fn write_asset(&self, name: &str, content: &[u8]) {
        fs::write(self.resources.join(name), content).expect("Failed to write asset");
    }

    /// Build a zip overlay in the resource bundle
    pub fn create_overlay(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let path = self.resources.join(name);
        write_zip(&path, files);
        path
    }

    /// Every regular file in the target, as `/`-separated relative paths
    pub fn files(&self) -> BTreeSet<String> {
        let mut files = BTreeSet::new();
        collect_files(&self.path, &self.path, &mut files);
        files
    }

    /// Snapshot archive names in the target root
    pub fn snapshots(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.path)
            .expect("Failed to read target")
            .map(|e| e.expect("Failed to read entry").file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with("NTSource_backup_") && n.ends_with(".zip"))
            .collect();
        names.sort();
        names
    }

    /// The ntpatch binary with target, resources and config home pointed
    /// at this fixture
    pub fn cmd(&self) -> Command {
        let mut cmd = ntpatch_cmd();
        cmd.env("NTPATCH_TARGET", &self.path)
            .env("NTPATCH_RESOURCES", &self.resources)
            .env("NTPATCH_CONFIG_HOME", &self.config_home)
            .env_remove("NTPATCH_CONFIG")
            .env_remove("NTPATCH_LOG");
        cmd
    }
}

impl Default for TestTarget {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn ntpatch_cmd() -> Command {
    Command::cargo_bin("ntpatch").expect("Failed to find ntpatch binary")
}

/// Write a zip archive with the given entries
pub fn write_zip(path: &Path, files: &[(&str, &str)]) {
    let file = File::create(path).expect("Failed to create archive");
    let mut zip = zip::ZipWriter::new(file);
    for (name, content) in files {
        zip.start_file(*name, SimpleFileOptions::default())
            .expect("Failed to start entry");
        zip.write_all(content.as_bytes()).expect("Failed to write entry");
    }
    zip.finish().expect("Failed to finish archive");
}

fn collect_files(root: &Path, dir: &Path, out: &mut BTreeSet<String>) {
    for entry in fs::read_dir(dir).expect("Failed to read directory") {
        let entry = entry.expect("Failed to read entry");
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            let relative = path.strip_prefix(root).expect("Path outside root");
            let parts: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            out.insert(parts.join("/"));
        }
    }
}
