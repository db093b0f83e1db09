//! Patch set configuration (ntpatch.yaml)
//!
//! A patch set names the marker the target folder must carry, the ordered
//! overlay archives, the privileged asset, the finalize scripts and the
//! manifest text. The built-in defaults describe the NEOTOKYO patch set;
//! any layer loaded by [`loader::ConfigLoader`] may override single fields.

pub mod loader;

pub use loader::ConfigLoader;

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::error::{PatchError, Result};

/// File name of a patch set configuration inside a resource bundle
pub const CONFIG_FILE_NAME: &str = "ntpatch.yaml";

/// Complete patch set configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchConfig {
    /// Substring the target folder name must contain (case-sensitive)
    pub marker: String,

    /// Prefix of snapshot archive names (`<prefix>_YYYYMMDD_HHMMSS.zip`)
    pub snapshot_prefix: String,

    /// Overlay archives applied in order, relative to the resource bundle
    pub overlays: Vec<String>,

    /// Extra overlay applied last when safe mode is chosen
    #[serde(default)]
    pub safe_mode_overlay: Option<String>,

    /// Binary copied unconditionally after all overlays
    pub privileged_asset: AssetConfig,

    /// Post-install scripts expected at the target root
    pub finalizer: PlatformNames,

    /// Manifest written after a successful install
    pub manifest: ManifestConfig,

    /// Identifier handed to the OS by `ntpatch launch`
    pub launch_uri: String,

    /// Program used to open the manifest
    pub viewer: PlatformNames,
}

/// Privileged asset location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// File name inside the resource bundle
    pub source: String,
    /// Path relative to the target root, `/`-separated
    pub destination: String,
}

/// A value that differs between Windows and every other platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformNames {
    pub windows: String,
    pub other: String,
}

impl PlatformNames {
    /// The value for the platform this binary was built for
    pub fn current(&self) -> &str {
        if cfg!(windows) {
            &self.windows
        } else {
            &self.other
        }
    }
}

/// Manifest text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestConfig {
    pub file_name: String,
    pub title: String,
    /// Numbered effect lines
    pub effects: Vec<String>,
    /// Line added when the safe-mode overlay was applied
    pub safe_mode_effect: String,
    pub source_url: String,
    pub restore_hint: String,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            marker: "NEOTOKYO".to_string(),
            snapshot_prefix: "NTSource_backup".to_string(),
            overlays: [
                "NT-IconFix.zip",
                "TedCustomSounds.zip",
                "VCROSD_FontMod.zip",
                "Silenced_MILSO.zip",
                "RedFragBlueSmoke.zip",
                "CONFIGS.zip",
                "FOOTSTEPS.zip",
                "ZR68_Sounds.zip",
                "ZR2013.zip",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            safe_mode_overlay: Some("STREAMSAFE.zip".to_string()),
            privileged_asset: AssetConfig {
                source: "client.dll".to_string(),
                destination: "NeotokyoSource/bin/client.dll".to_string(),
            },
            finalizer: PlatformNames {
                windows: "iconfix.bat".to_string(),
                other: "iconfix.sh".to_string(),
            },
            manifest: ManifestConfig::default(),
            launch_uri: "steam://run/244630".to_string(),
            viewer: PlatformNames {
                windows: "notepad.exe".to_string(),
                other: "vim".to_string(),
            },
        }
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            file_name: "readme_patcher.txt".to_string(),
            title: "NEOTOKYO Patch List:".to_string(),
            effects: [
                "Extracted and applied the NT-IconFix patch.",
                "Overwritten existing client.dll for FOV patch in NeotokyoSource/bin.",
                "Applies OLD 2013 ZR68C, ZR68S, ZR68L weapon models.",
                "Applies custom silenced recon MILSO model.",
                "Applies custom sound overrides for all various weapons.",
                "Applies custom VCR OSD MONO font replacements.",
                "Applies custom grenade skins to differentiate them easier.",
                "Adjusts client default config with accurate rates for smoothest play.",
                "Applies custom footstep sounds for the player.",
                "Applies new & unique ZR68 weapon sounds.",
                "Applies toggled crouch & lean alias binds.",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            safe_mode_effect: "Streamsafe materials & textures for SFW twitch streaming."
                .to_string(),
            source_url: "https://bonahnsa.com/mods.html".to_string(),
            restore_hint: "You may run 'ntpatch restore' against the NEOTOKYO game path to \
                           restore original files."
                .to_string(),
        }
    }
}

impl PatchConfig {
    /// Check values that would make the pipeline misbehave
    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(invalid("marker must not be empty"));
        }
        if self.snapshot_prefix.is_empty()
            || self.snapshot_prefix.contains(['/', '\\'])
        {
            return Err(invalid(
                "snapshot_prefix must be a non-empty file name prefix",
            ));
        }
        if self.overlays.iter().any(String::is_empty) {
            return Err(invalid("overlay names must not be empty"));
        }
        if !is_contained_relative(Path::new(&self.privileged_asset.destination)) {
            return Err(invalid(format!(
                "privileged_asset.destination must stay inside the target: {}",
                self.privileged_asset.destination
            )));
        }
        if self.manifest.file_name.is_empty() || self.manifest.file_name.contains(['/', '\\']) {
            return Err(invalid("manifest.file_name must be a plain file name"));
        }
        Ok(())
    }

    /// Overlay list for one install, safe-mode overlay last when chosen
    pub fn overlay_names(&self, safe_mode: bool) -> Vec<&str> {
        let mut names: Vec<&str> = self.overlays.iter().map(String::as_str).collect();
        if safe_mode {
            if let Some(extra) = &self.safe_mode_overlay {
                names.push(extra);
            }
        }
        names
    }
}

fn invalid(message: impl Into<String>) -> PatchError {
    PatchError::ConfigInvalid {
        message: message.into(),
    }
}

fn is_contained_relative(path: &Path) -> bool {
    path.components().count() > 0 && path.components().all(|c| matches!(c, Component::Normal(_)))
}
