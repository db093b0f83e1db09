//! Overlay application
//!
//! Overlays are extracted in list order straight over the target; a later
//! overlay silently replaces files written by an earlier one. A missing or
//! unreadable overlay is recorded and skipped, already-applied overlays are
//! never rolled back. The privileged asset is copied last, always.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::archive;
use crate::error::{PatchError, Result};
use crate::hash;
use crate::ui::ProgressReporter;
use crate::validator::TargetDir;

/// A binary copied into the target at a fixed relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegedAsset {
    pub source: PathBuf,
    /// Relative to the target root, `/`-separated
    pub destination: String,
}

impl PrivilegedAsset {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    fn destination_in(&self, target: &TargetDir) -> PathBuf {
        self.destination
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(target.root().to_path_buf(), |path, part| path.join(part))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayStatus {
    Applied { files: usize, digest: String },
    Missing,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayOutcome {
    pub path: PathBuf,
    pub status: OverlayStatus,
}

impl OverlayOutcome {
    /// File name of the overlay archive
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn is_applied(&self) -> bool {
        matches!(self.status, OverlayStatus::Applied { .. })
    }

    /// The non-fatal error this outcome stands for, if any
    pub fn error(&self) -> Option<PatchError> {
        match &self.status {
            OverlayStatus::Applied { .. } => None,
            OverlayStatus::Missing => Some(PatchError::OverlayMissing {
                path: self.path.display().to_string(),
            }),
            OverlayStatus::Failed { reason } => Some(PatchError::OverlayFailed {
                path: self.path.display().to_string(),
                reason: reason.clone(),
            }),
        }
    }
}

/// Per-overlay outcomes of one batch, in application order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayReport {
    pub outcomes: Vec<OverlayOutcome>,
    /// Where the privileged asset was written
    pub asset_path: Option<PathBuf>,
}

impl OverlayReport {
    pub fn applied(&self) -> impl Iterator<Item = &OverlayOutcome> {
        self.outcomes.iter().filter(|o| o.is_applied())
    }

    pub fn not_applied(&self) -> impl Iterator<Item = &OverlayOutcome> {
        self.outcomes.iter().filter(|o| !o.is_applied())
    }

    pub fn missing(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == OverlayStatus::Missing)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, OverlayStatus::Failed { .. }))
            .count()
    }

    /// Whether the overlay with this file name was applied
    pub fn was_applied(&self, name: &str) -> bool {
        self.applied().any(|o| o.name() == name)
    }
}

/// Extract `overlays` in order over the target, then copy the asset
pub fn apply_overlays(
    target: &TargetDir,
    overlays: &[PathBuf],
    asset: &PrivilegedAsset,
    progress: &mut dyn ProgressReporter,
) -> Result<OverlayReport> {
    let mut report = OverlayReport::default();

    progress.start("Patch", overlays.len() as u64);
    for overlay in overlays {
        let status = apply_one(target, overlay);
        let outcome = OverlayOutcome {
            path: overlay.clone(),
            status,
        };
        progress.advance(&outcome.name());
        report.outcomes.push(outcome);
    }
    progress.finish();

    report.asset_path = Some(copy_asset(target, asset)?);
    Ok(report)
}

fn apply_one(target: &TargetDir, overlay: &Path) -> OverlayStatus {
    if !overlay.is_file() {
        warn!(overlay = %overlay.display(), "overlay archive does not exist, skipping");
        return OverlayStatus::Missing;
    }

    let digest = match hash::hash_file(overlay) {
        Ok(digest) => digest,
        Err(err) => {
            warn!(overlay = %overlay.display(), error = %err, "cannot read overlay");
            return OverlayStatus::Failed {
                reason: err.to_string(),
            };
        }
    };

    match archive::extract_archive(overlay, target.root()) {
        Ok(files) => {
            info!(
                overlay = %overlay.display(),
                files = files.len(),
                digest = %digest,
                "overlay applied"
            );
            OverlayStatus::Applied {
                files: files.len(),
                digest,
            }
        }
        Err(err) => {
            warn!(overlay = %overlay.display(), error = %err, "overlay extraction failed");
            OverlayStatus::Failed {
                reason: err.to_string(),
            }
        }
    }
}

/// Copy the privileged asset, replacing whatever is at the destination
pub fn copy_asset(target: &TargetDir, asset: &PrivilegedAsset) -> Result<PathBuf> {
    if !asset.source.is_file() {
        return Err(PatchError::AssetMissing {
            path: asset.source.display().to_string(),
        });
    }

    let dest = asset.destination_in(target);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| PatchError::write_failed(parent, e))?;
    }
    fs::copy(&asset.source, &dest).map_err(|e| PatchError::write_failed(&dest, e))?;

    debug!(source = %asset.source.display(), dest = %dest.display(), "privileged asset copied");
    Ok(dest)
}
