//! Rollback to the newest snapshot
//!
//! The newest archive under the snapshot grammar is extracted over the
//! target. With pruning enabled, files the snapshot does not know about are
//! removed afterwards so the target matches the snapshot exactly; snapshot
//! archives themselves are never removed. There is no rollback of a
//! half-finished extraction.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::archive;
use crate::error::{PatchError, Result};
use crate::snapshot::{self, SnapshotName};
use crate::validator::TargetDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreOptions {
    /// Remove files that are not part of the snapshot
    pub prune: bool,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self { prune: true }
    }
}

/// Which snapshot was restored and what changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredFrom {
    pub name: SnapshotName,
    pub path: PathBuf,
    pub restored: usize,
    pub pruned: Vec<PathBuf>,
}

/// Restore the target from its newest snapshot
pub fn restore(target: &TargetDir, prefix: &str, options: RestoreOptions) -> Result<RestoredFrom> {
    let (name, path) =
        snapshot::latest_snapshot(target, prefix)?.ok_or_else(|| PatchError::NoBackupFound {
            path: target.root().display().to_string(),
        })?;
    info!(snapshot = %name, "restoring from snapshot");

    // Index first so an unreadable archive fails before anything is written
    let known: HashSet<PathBuf> = archive::list_files(&path)?.into_iter().collect();
    let restored = archive::extract_archive(&path, target.root())?;
    debug!(files = restored.len(), "snapshot extracted");

    let pruned = if options.prune {
        prune_extra(target, prefix, &known)?
    } else {
        Vec::new()
    };

    Ok(RestoredFrom {
        name,
        path,
        restored: restored.len(),
        pruned,
    })
}

/// Remove regular files absent from `known`, then directories left empty
fn prune_extra(target: &TargetDir, prefix: &str, known: &HashSet<PathBuf>) -> Result<Vec<PathBuf>> {
    let root = target.root();
    let mut extra = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if SnapshotName::parse(prefix, &file_name).is_some() || archive::is_staging_name(&file_name) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| PatchError::read_failed(entry.path(), e))?;
        if !known.contains(relative) {
            extra.push(relative.to_path_buf());
        }
    }

    let mut emptied: BTreeSet<PathBuf> = BTreeSet::new();
    for relative in &extra {
        let path = root.join(relative);
        fs::remove_file(&path).map_err(|e| PatchError::write_failed(&path, e))?;
        debug!(path = %relative.display(), "pruned file not in snapshot");

        let mut parent = relative.parent();
        while let Some(dir) = parent.filter(|d| !d.as_os_str().is_empty()) {
            emptied.insert(dir.to_path_buf());
            parent = dir.parent();
        }
    }

    // Deepest directories first
    let mut dirs: Vec<PathBuf> = emptied.into_iter().collect();
    dirs.sort_by_key(|d| std::cmp::Reverse(d.components().count()));
    for dir in dirs {
        remove_if_empty(&root.join(dir))?;
    }

    Ok(extra)
}

fn remove_if_empty(dir: &Path) -> Result<()> {
    let mut entries = fs::read_dir(dir).map_err(|e| PatchError::read_failed(dir, e))?;
    if entries.next().is_none() {
        fs::remove_dir(dir).map_err(|e| PatchError::write_failed(dir, e))?;
    }
    Ok(())
}
