//! Command helper utilities

use std::path::PathBuf;

use crate::config::{ConfigLoader, PatchConfig, loader};
use crate::error::{PatchError, Result};
use crate::resources::ResourceBundle;
use crate::ui::prompt::{AcceptDefaults, InquirePrompter, Prompter};

/// Options shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub target: Option<PathBuf>,
    pub resources: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Resolved inputs of one invocation
pub struct Session {
    pub config: PatchConfig,
    pub resources: ResourceBundle,
    pub target: PathBuf,
}

impl Session {
    /// Resolve the resource bundle, then load configuration from it
    pub fn open(globals: &GlobalArgs) -> Result<Self> {
        let probe = PatchConfig::default().privileged_asset.source;
        let resources = ResourceBundle::resolve(globals.resources.clone(), &probe)?;
        let config = ConfigLoader::new(resources.root())
            .with_global_dir(loader::global_dir())
            .with_explicit(globals.config.clone())
            .load()?;
        let target = resolve_target_path(globals.target.clone())?;

        Ok(Self {
            config,
            resources,
            target,
        })
    }
}

/// Resolve target path from optional argument
///
/// If a target path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_target_path(target: Option<PathBuf>) -> Result<PathBuf> {
    match target {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| PatchError::IoError {
            message: format!("Failed to get current directory: {e}"),
        }),
    }
}

/// Prompter for a command: `--yes` answers every question with its default
pub fn prompter(yes: bool) -> Box<dyn Prompter> {
    if yes {
        Box::new(AcceptDefaults)
    } else {
        Box::new(InquirePrompter)
    }
}
