//! Install manifest (`readme_patcher.txt`)
//!
//! A plain-text record written to the target root after every install. The
//! numbered effect lines come from configuration; the archive sections list
//! what the overlay report says was actually applied.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{ManifestConfig, PlatformNames};
use crate::error::{PatchError, Result};
use crate::overlay::{OverlayReport, OverlayStatus};
use crate::process::{Invocation, ProcessRunner, WaitMode};
use crate::validator::TargetDir;

const RULE_WIDTH: usize = 40;

/// Render the manifest text
///
/// `safe_mode_overlay` names the optional overlay whose effect line is only
/// included when it was applied.
pub fn render(
    config: &ManifestConfig,
    report: &OverlayReport,
    safe_mode_overlay: Option<&str>,
    target: &TargetDir,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&config.title);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for (i, effect) in config.effects.iter().enumerate() {
        out.push_str(&format!("{}. {effect}\n", i + 1));
    }

    if safe_mode_overlay.is_some_and(|name| report.was_applied(name)) {
        out.push('\n');
        out.push_str(&format!("(SAFE MODE) {}\n", config.safe_mode_effect));
    }

    out.push('\n');
    out.push_str("Applied archives:\n");
    let mut any_applied = false;
    for outcome in report.applied() {
        if let OverlayStatus::Applied { files, digest } = &outcome.status {
            any_applied = true;
            out.push_str(&format!("  - {} ({files} files, {digest})\n", outcome.name()));
        }
    }
    if !any_applied {
        out.push_str("  (none)\n");
    }

    let skipped: Vec<_> = report.not_applied().collect();
    if !skipped.is_empty() {
        out.push_str("Not applied:\n");
        for outcome in skipped {
            let reason = match &outcome.status {
                OverlayStatus::Missing => "archive not found".to_string(),
                OverlayStatus::Failed { reason } => reason.clone(),
                OverlayStatus::Applied { .. } => continue,
            };
            out.push_str(&format!("  - {}: {reason}\n", outcome.name()));
        }
    }

    if let Some(asset) = &report.asset_path {
        let shown = asset.strip_prefix(target.root()).unwrap_or(asset);
        out.push_str(&format!(
            "Privileged asset: {}\n",
            crate::archive::entry_name(shown)
        ));
    }

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("FROM: {}\n", config.source_url));
    out.push('\n');
    out.push_str(&config.restore_hint);
    out.push('\n');
    out
}

/// Write the manifest into the target root, replacing any previous one
pub fn write_manifest(
    target: &TargetDir,
    config: &ManifestConfig,
    report: &OverlayReport,
    safe_mode_overlay: Option<&str>,
) -> Result<PathBuf> {
    let path = target.join(&config.file_name);
    let content = render(config, report, safe_mode_overlay, target);

    let mut staged =
        tempfile::NamedTempFile::new_in(target.root()).map_err(|e| PatchError::write_failed(&path, e))?;
    staged
        .write_all(content.as_bytes())
        .map_err(|e| PatchError::write_failed(&path, e))?;
    staged
        .persist(&path)
        .map_err(|e| PatchError::write_failed(&path, e.error))?;

    info!(manifest = %path.display(), "manifest written");
    Ok(path)
}

/// Open the manifest in the platform's viewer and wait for it to close
pub fn open_manifest(runner: &dyn ProcessRunner, path: &Path, viewer: &PlatformNames) -> Result<()> {
    if !path.is_file() {
        return Err(PatchError::MissingPath {
            path: path.display().to_string(),
        });
    }

    let program = viewer.current();
    debug!(viewer = program, manifest = %path.display(), "opening manifest");
    runner
        .run(&Invocation::new(program).arg(path), WaitMode::Blocking)
        .map_err(|e| PatchError::LaunchFailed {
            target: program.to_string(),
            reason: e.to_string(),
        })?;
    Ok(())
}
