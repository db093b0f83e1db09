//! Target directory snapshots
//!
//! A snapshot is a full archive of the target's regular files, written into
//! the target itself under a name following [`SnapshotName`]. Earlier
//! snapshots found anywhere in the tree are never archived again.

mod name;

pub use name::SnapshotName;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::archive::{self, ArchiveEntry};
use crate::error::{PatchError, Result};
use crate::ui::ProgressReporter;
use crate::validator::TargetDir;

/// A snapshot that was written successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHandle {
    pub name: SnapshotName,
    pub path: PathBuf,
    /// Number of files archived
    pub files: usize,
}

/// Snapshot the target now
pub fn snapshot(
    target: &TargetDir,
    prefix: &str,
    progress: &mut dyn ProgressReporter,
) -> Result<SnapshotHandle> {
    snapshot_at(target, SnapshotName::now(prefix), prefix, progress)
}

/// Snapshot the target under a given name
pub fn snapshot_at(
    target: &TargetDir,
    name: SnapshotName,
    prefix: &str,
    progress: &mut dyn ProgressReporter,
) -> Result<SnapshotHandle> {
    let path = target.join(name.file_name());
    let entries = collect_entries(target.root(), prefix)?;
    debug!(files = entries.len(), snapshot = %name, "enumerated target files");

    progress.start("Backup", entries.len() as u64);
    if let Err(err) = archive::write_archive(&path, &entries, progress) {
        progress.abandon();
        return Err(err);
    }
    progress.finish();

    info!(snapshot = %path.display(), files = entries.len(), "snapshot written");
    Ok(SnapshotHandle {
        name,
        path,
        files: entries.len(),
    })
}

/// Point-in-time listing of the files a snapshot of `root` would contain
///
/// Fails on a path that is not valid UTF-8: zip entry names cannot carry it
/// unchanged, and a renamed entry would not restore the original file.
pub fn collect_entries(root: &Path, prefix: &str) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if SnapshotName::parse(prefix, &file_name).is_some()
            || archive::is_staging_name(&file_name)
        {
            debug!(path = %entry.path().display(), "skipping snapshot archive");
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| PatchError::read_failed(entry.path(), e))?;
        if relative.to_str().is_none() {
            return Err(PatchError::read_failed(
                entry.path(),
                "file name is not valid UTF-8 and cannot be archived",
            ));
        }
        entries.push(ArchiveEntry {
            source: entry.path().to_path_buf(),
            name: archive::entry_name(relative),
        });
    }

    Ok(entries)
}

/// Snapshots directly under the target, newest first
pub fn list_snapshots(target: &TargetDir, prefix: &str) -> Result<Vec<(SnapshotName, PathBuf)>> {
    let read_dir = fs::read_dir(target.root()).map_err(|e| PatchError::read_failed(target.root(), e))?;

    let mut found = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| PatchError::read_failed(target.root(), e))?;
        let file_name = entry.file_name();
        let Some(name) = SnapshotName::parse(prefix, &file_name.to_string_lossy()) else {
            continue;
        };
        if entry.path().is_file() {
            found.push((name, entry.path()));
        }
    }

    found.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(found)
}

/// The newest snapshot, if any
pub fn latest_snapshot(target: &TargetDir, prefix: &str) -> Result<Option<(SnapshotName, PathBuf)>> {
    Ok(list_snapshots(target, prefix)?.into_iter().next())
}
