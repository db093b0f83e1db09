//! Precondition checks run before anything is mutated
//!
//! The marker check guards against pointing the patcher at an unrelated
//! folder: the final segment of the target path must contain the marker,
//! case-sensitively.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::PatchConfig;
use crate::error::{PatchError, Result};
use crate::resources::ResourceBundle;

/// A target directory that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDir {
    root: PathBuf,
}

impl TargetDir {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}

/// Validate a target directory against the marker
pub fn validate(target: &Path, marker: &str) -> Result<TargetDir> {
    if !target.exists() {
        return Err(PatchError::MissingPath {
            path: target.display().to_string(),
        });
    }
    if !target.is_dir() {
        return Err(PatchError::NotADirectory {
            path: target.display().to_string(),
        });
    }

    let root = dunce::canonicalize(target).map_err(|e| PatchError::read_failed(target, e))?;

    // `.` and friends have no final segment; fall back to the resolved name
    let name = target
        .file_name()
        .or_else(|| root.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !name.contains(marker) {
        return Err(PatchError::MarkerNotFound {
            path: target.display().to_string(),
            marker: marker.to_string(),
        });
    }

    debug!(target = %root.display(), "target directory validated");
    Ok(TargetDir { root })
}

/// Check that the resource bundle holds everything an install cannot skip
///
/// Overlays are deliberately not checked here: a missing overlay is reported
/// per overlay and the batch continues.
pub fn validate_resources(resources: &ResourceBundle, config: &PatchConfig) -> Result<PathBuf> {
    let asset = resources.path(&config.privileged_asset.source);
    if !asset.is_file() {
        return Err(PatchError::AssetMissing {
            path: asset.display().to_string(),
        });
    }
    Ok(asset)
}
