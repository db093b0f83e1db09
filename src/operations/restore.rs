//! Restore operation
//!
//! Looks up the newest snapshot first so the confirmation can name it, then
//! hands over to the restore engine.

use std::path::Path;

use console::Style;

use crate::config::PatchConfig;
use crate::error::{PatchError, Result};
use crate::restore::{self, RestoreOptions, RestoredFrom};
use crate::snapshot;
use crate::ui::prompt::Prompter;
use crate::validator;

pub struct RestoreOperation<'a> {
    config: &'a PatchConfig,
    prompter: &'a dyn Prompter,
    options: RestoreOptions,
}

impl<'a> RestoreOperation<'a> {
    pub fn new(config: &'a PatchConfig, prompter: &'a dyn Prompter, options: RestoreOptions) -> Self {
        Self {
            config,
            prompter,
            options,
        }
    }

    /// Restore the target; `Ok(None)` when the user declined
    pub fn execute(&self, target: &Path) -> Result<Option<RestoredFrom>> {
        let target = validator::validate(target, &self.config.marker)?;
        let prefix = &self.config.snapshot_prefix;

        let (latest, _) =
            snapshot::latest_snapshot(&target, prefix)?.ok_or_else(|| PatchError::NoBackupFound {
                path: target.root().display().to_string(),
            })?;

        let help = if self.options.prune {
            "Files added since the backup will be removed"
        } else {
            "Files added since the backup are kept"
        };
        let confirmed = self.prompter.confirm(
            &format!("Restore {} over {}?", latest, target.root().display()),
            help,
            true,
        )?;
        if !confirmed {
            println!("Restore cancelled.");
            return Ok(None);
        }

        let restored = restore::restore(&target, prefix, self.options)?;
        println!(
            "{} {} ({} files restored, {} removed)",
            Style::new().bold().green().apply_to("Restored from"),
            restored.name,
            restored.restored,
            restored.pruned.len()
        );
        Ok(Some(restored))
    }
}
