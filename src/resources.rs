//! Resource bundle lookup
//!
//! Overlays, the privileged asset and an optional `ntpatch.yaml` live in one
//! directory shipped next to the binary. It is resolved from the
//! `--resources` flag, then the executable's directory when it looks like a
//! bundle, then the current directory.

use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;
use crate::error::{PatchError, Result};

/// Directory holding the patch archives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBundle {
    root: PathBuf,
}

impl ResourceBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the bundle directory
    ///
    /// `probe` is a file whose presence marks the executable's directory as a
    /// bundle even without a configuration file. Configuration is read from
    /// the bundle, so callers pass the built-in privileged asset name: a
    /// bundle that renames the asset must ship `ntpatch.yaml` to be found
    /// next to the executable.
    pub fn resolve(explicit: Option<PathBuf>, probe: &str) -> Result<Self> {
        if let Some(dir) = explicit {
            if !dir.is_dir() {
                return Err(PatchError::MissingPath {
                    path: dir.display().to_string(),
                });
            }
            return Ok(Self::new(dir));
        }

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            if looks_like_bundle(&exe_dir, probe) {
                return Ok(Self::new(exe_dir));
            }
        }

        let cwd = std::env::current_dir().map_err(|e| PatchError::IoError {
            message: format!("Failed to get current directory: {e}"),
        })?;
        Ok(Self::new(cwd))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a named resource inside the bundle
    pub fn path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.root.join(name)
    }
}

fn looks_like_bundle(dir: &Path, probe: &str) -> bool {
    dir.join(CONFIG_FILE_NAME).is_file() || dir.join(probe).is_file()
}
