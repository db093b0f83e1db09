//! Configuration loading and merging
//!
//! Layers are merged field by field, later layers winning:
//! 1. Built-in defaults
//! 2. Global `ntpatch/config.yaml` under the user config directory, or
//!    `$NTPATCH_CONFIG_HOME/config.yaml` (if it exists)
//! 3. `ntpatch.yaml` in the resource bundle (if it exists)
//! 4. An explicit `--config` file (must exist)

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::debug;

use super::{CONFIG_FILE_NAME, PatchConfig};
use crate::error::{PatchError, Result};

/// Environment variable overriding the global configuration directory
pub const CONFIG_HOME_ENV: &str = "NTPATCH_CONFIG_HOME";

/// Layered configuration loader
pub struct ConfigLoader {
    resources_root: PathBuf,
    explicit: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader for a resource bundle, without a global layer
    pub fn new(resources_root: impl Into<PathBuf>) -> Self {
        Self {
            resources_root: resources_root.into(),
            explicit: None,
            global_dir: None,
        }
    }

    /// Add an explicit configuration file as the last layer
    pub fn with_explicit(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    /// Read the global layer from `dir`
    pub fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Load and validate the merged configuration
    pub fn load(&self) -> Result<PatchConfig> {
        let mut merged = serde_yaml::to_value(PatchConfig::default())?;

        if let Some(dir) = &self.global_dir {
            if let Some(layer) = read_layer(&dir.join("config.yaml"), false)? {
                merge_values(&mut merged, layer);
            }
        }

        if let Some(layer) = read_layer(&self.resources_root.join(CONFIG_FILE_NAME), false)? {
            merge_values(&mut merged, layer);
        }

        if let Some(path) = &self.explicit {
            if let Some(layer) = read_layer(path, true)? {
                merge_values(&mut merged, layer);
            }
        }

        let config: PatchConfig =
            serde_yaml::from_value(merged).map_err(|e| PatchError::ConfigParseFailed {
                path: "merged configuration".to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }
}

/// Global configuration directory: `$NTPATCH_CONFIG_HOME`, else
/// `<config_dir>/ntpatch`
pub fn global_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_HOME_ENV) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => dirs::config_dir().map(|dir| dir.join("ntpatch")),
    }
}

fn read_layer(path: &Path, required: bool) -> Result<Option<Value>> {
    if !path.is_file() {
        if required {
            return Err(PatchError::ConfigReadFailed {
                path: path.display().to_string(),
                reason: "file does not exist".to_string(),
            });
        }
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| PatchError::ConfigReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let value: Value =
        serde_yaml::from_str(&content).map_err(|e| PatchError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    match value {
        Value::Null => Ok(None),
        Value::Mapping(_) => {
            debug!(path = %path.display(), "loaded configuration layer");
            Ok(Some(value))
        }
        _ => Err(PatchError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: "top level must be a mapping".to_string(),
        }),
    }
}

/// Merge `overlay` into `base`: mappings merge key by key, anything else
/// replaces the base value
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
