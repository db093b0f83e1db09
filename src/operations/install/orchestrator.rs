//! Install workflow
//!
//! validate → snapshot (optional) → overlays → finalize script → manifest
//! → optional manifest viewing. Nothing is written before both the target
//! and the resource bundle passed validation, and no overlay is touched if
//! the requested snapshot could not be written.

use std::path::{Path, PathBuf};

use tracing::info;

use super::display;
use crate::config::PatchConfig;
use crate::error::Result;
use crate::finalizer::{self, FinalizeOutcome};
use crate::manifest;
use crate::overlay::{self, OverlayReport, PrivilegedAsset};
use crate::process::ProcessRunner;
use crate::resources::ResourceBundle;
use crate::snapshot::{self, SnapshotHandle};
use crate::ui::ProgressReporter;
use crate::ui::prompt::{self, Prompter};
use crate::validator;

/// Answers to the install questions; `None` means ask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    pub backup: Option<bool>,
    pub safe_mode: Option<bool>,
    pub open_manifest: Option<bool>,
}

/// Everything an install did
#[derive(Debug, Clone)]
pub struct InstallSummary {
    pub snapshot: Option<SnapshotHandle>,
    pub safe_mode: bool,
    pub report: OverlayReport,
    pub finalizer: FinalizeOutcome,
    pub manifest: PathBuf,
}

/// High-level install operation
pub struct InstallOperation<'a> {
    config: &'a PatchConfig,
    resources: &'a ResourceBundle,
    prompter: &'a dyn Prompter,
    runner: &'a dyn ProcessRunner,
    progress: Box<dyn ProgressReporter>,
    options: InstallOptions,
}

impl<'a> InstallOperation<'a> {
    pub fn new(
        config: &'a PatchConfig,
        resources: &'a ResourceBundle,
        prompter: &'a dyn Prompter,
        runner: &'a dyn ProcessRunner,
        progress: Box<dyn ProgressReporter>,
        options: InstallOptions,
    ) -> Self {
        Self {
            config,
            resources,
            prompter,
            runner,
            progress,
            options,
        }
    }

    /// Run the whole pipeline against `target`
    pub fn execute(&mut self, target: &Path) -> Result<InstallSummary> {
        let target = validator::validate(target, &self.config.marker)?;
        let asset_source = validator::validate_resources(self.resources, self.config)?;

        let backup = prompt::decide(
            self.options.backup,
            self.prompter,
            "Create a backup of the current files before patching?",
            "The backup can be restored later with 'ntpatch restore'",
            true,
        )?;
        let snapshot = if backup {
            let handle = snapshot::snapshot(&target, &self.config.snapshot_prefix, self.progress.as_mut())?;
            display::print_snapshot(&handle);
            Some(handle)
        } else {
            info!("backup skipped");
            None
        };

        let safe_mode = match &self.config.safe_mode_overlay {
            Some(name) => prompt::decide(
                self.options.safe_mode,
                self.prompter,
                "Enable safe mode?",
                &format!("Also applies {name} (streamsafe materials and textures)"),
                false,
            )?,
            None => false,
        };

        let overlays: Vec<PathBuf> = self
            .config
            .overlay_names(safe_mode)
            .into_iter()
            .map(|name| self.resources.path(name))
            .collect();
        let asset = PrivilegedAsset::new(asset_source, self.config.privileged_asset.destination.clone());
        let report = overlay::apply_overlays(&target, &overlays, &asset, self.progress.as_mut())?;
        display::print_overlay_report(&report);

        let finalizer = finalizer::run_finalizer(self.runner, &target, &self.config.finalizer)?;
        display::print_finalizer(&finalizer);

        let safe_mode_overlay = if safe_mode {
            self.config.safe_mode_overlay.as_deref()
        } else {
            None
        };
        let manifest = manifest::write_manifest(&target, &self.config.manifest, &report, safe_mode_overlay)?;

        let open = prompt::decide(
            self.options.open_manifest,
            self.prompter,
            "Open the patch list?",
            &format!("Opens {} with {}", self.config.manifest.file_name, self.config.viewer.current()),
            false,
        )?;
        if open {
            manifest::open_manifest(self.runner, &manifest, &self.config.viewer)?;
        }

        Ok(InstallSummary {
            snapshot,
            safe_mode,
            report,
            finalizer,
            manifest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{self, ArchiveEntry};
    use crate::error::PatchError;
    use crate::process::WaitMode;
    use crate::process::testing::RecordingRunner;
    use crate::ui::SilentProgressReporter;
    use crate::ui::prompt::AcceptDefaults;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        temp: TempDir,
        config: PatchConfig,
        resources: ResourceBundle,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let res = temp.path().join("res");
            fs::create_dir_all(&res).unwrap();
            fs::create_dir_all(temp.path().join("NEOTOKYO")).unwrap();
            fs::write(temp.path().join("NEOTOKYO/a.txt"), "alpha").unwrap();
            fs::write(res.join("client.dll"), "MZ").unwrap();

            let config = PatchConfig {
                overlays: vec!["O1.zip".to_string(), "O2.zip".to_string()],
                safe_mode_overlay: Some("SAFE.zip".to_string()),
                ..PatchConfig::default()
            };
            let fixture = Self {
                resources: ResourceBundle::new(&res),
                temp,
                config,
            };
            fixture.overlay(
                "O1.zip",
                &[("b.txt", "from O1"), ("iconfix.bat", "exit /b 0"), ("iconfix.sh", "exit 0")],
            );
            fixture.overlay("O2.zip", &[("b.txt", "from O2"), ("c.txt", "from O2")]);
            fixture.overlay("SAFE.zip", &[("materials/safe.vmt", "safe")]);
            fixture
        }

        fn overlay(&self, name: &str, files: &[(&str, &str)]) {
            let staging = self.temp.path().join(format!("staging-{name}"));
            let entries: Vec<ArchiveEntry> = files
                .iter()
                .map(|(entry, content)| {
                    let source = staging.join(entry);
                    fs::create_dir_all(source.parent().unwrap()).unwrap();
                    fs::write(&source, content).unwrap();
                    ArchiveEntry {
                        source,
                        name: (*entry).to_string(),
                    }
                })
                .collect();
            archive::write_archive(
                &self.resources.path(name),
                &entries,
                &mut SilentProgressReporter,
            )
            .unwrap();
        }

        fn target(&self) -> PathBuf {
            self.temp.path().join("NEOTOKYO")
        }

        fn run(&self, runner: &RecordingRunner, options: InstallOptions) -> Result<InstallSummary> {
            InstallOperation::new(
                &self.config,
                &self.resources,
                &AcceptDefaults,
                runner,
                Box::new(SilentProgressReporter),
                options,
            )
            .execute(&self.target())
        }
    }

    #[test]
    fn test_full_install_with_defaults() {
        let fx = Fixture::new();
        let runner = RecordingRunner::exiting(0);
        let summary = fx.run(&runner, InstallOptions::default()).unwrap();

        assert!(summary.snapshot.is_some());
        assert!(!summary.safe_mode);
        assert_eq!(summary.report.applied().count(), 2);
        assert!(summary.finalizer.succeeded());
        assert_eq!(fs::read_to_string(fx.target().join("b.txt")).unwrap(), "from O2");
        assert!(fx.target().join("NeotokyoSource/bin/client.dll").is_file());
        assert!(summary.manifest.is_file());
        assert!(!fx.target().join("materials").exists());

        // Only the finalizer ran; the manifest was not opened
        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, WaitMode::Blocking);
    }

    #[test]
    fn test_safe_mode_appends_overlay() {
        let fx = Fixture::new();
        let options = InstallOptions {
            safe_mode: Some(true),
            ..InstallOptions::default()
        };
        let summary = fx.run(&RecordingRunner::exiting(0), options).unwrap();
        assert!(summary.safe_mode);
        assert!(summary.report.was_applied("SAFE.zip"));
        assert!(fx.target().join("materials/safe.vmt").is_file());
    }

    #[test]
    fn test_no_backup() {
        let fx = Fixture::new();
        let options = InstallOptions {
            backup: Some(false),
            ..InstallOptions::default()
        };
        let summary = fx.run(&RecordingRunner::exiting(0), options).unwrap();
        assert!(summary.snapshot.is_none());
        let target = validator::validate(&fx.target(), "NEOTOKYO").unwrap();
        assert!(snapshot::list_snapshots(&target, "NTSource_backup").unwrap().is_empty());
    }

    #[test]
    fn test_marker_failure_touches_nothing() {
        let mut fx = Fixture::new();
        fx.config.marker = "SOMETHING_ELSE".to_string();
        let result = fx.run(&RecordingRunner::exiting(0), InstallOptions::default());
        assert!(matches!(result, Err(PatchError::MarkerNotFound { .. })));
        assert!(!fx.target().join("b.txt").exists());
        assert_eq!(fs::read_dir(fx.target()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_asset_touches_nothing() {
        let fx = Fixture::new();
        fs::remove_file(fx.resources.path("client.dll")).unwrap();
        let result = fx.run(&RecordingRunner::exiting(0), InstallOptions::default());
        assert!(matches!(result, Err(PatchError::AssetMissing { .. })));
        assert_eq!(fs::read_dir(fx.target()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_script_stops_before_manifest() {
        let mut fx = Fixture::new();
        fx.config.overlays = vec!["O2.zip".to_string()];
        let result = fx.run(&RecordingRunner::exiting(0), InstallOptions::default());
        assert!(matches!(result, Err(PatchError::ScriptMissing { .. })));
        assert!(fx.target().join("c.txt").is_file());
        assert!(!fx.target().join("readme_patcher.txt").exists());
    }

    #[test]
    fn test_non_zero_finalizer_still_completes() {
        let fx = Fixture::new();
        let summary = fx.run(&RecordingRunner::exiting(1), InstallOptions::default()).unwrap();
        assert!(summary.finalizer.warning().is_some());
        assert!(summary.manifest.is_file());
    }

    #[test]
    fn test_open_manifest_runs_viewer() {
        let fx = Fixture::new();
        let runner = RecordingRunner::exiting(0);
        let options = InstallOptions {
            open_manifest: Some(true),
            ..InstallOptions::default()
        };
        let summary = fx.run(&runner, options).unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].0.program, fx.config.viewer.current());
        assert_eq!(calls[1].0.args, vec![summary.manifest.into_os_string()]);
    }
}
