//! Post-install finalize script
//!
//! The script ships inside an overlay and lands at the target root. It runs
//! with the target as working directory and the install waits for it. A
//! non-zero exit is only a warning: some environments exit non-zero on
//! success.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::PlatformNames;
use crate::error::{PatchError, Result};
use crate::process::{Invocation, ProcessRunner, RunOutcome, WaitMode};
use crate::validator::TargetDir;

/// Result of running the finalize script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeOutcome {
    pub script: PathBuf,
    /// `None` when the script was killed by a signal
    pub exit_code: Option<i32>,
}

impl FinalizeOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// The tolerated failure, if the script did not exit cleanly
    pub fn warning(&self) -> Option<PatchError> {
        if self.succeeded() {
            return None;
        }
        Some(PatchError::ScriptNonZeroExit {
            script: self.script_name(),
            code: self.exit_code.unwrap_or(-1),
        })
    }

    fn script_name(&self) -> String {
        self.script
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.script.display().to_string())
    }
}

/// Build the interpreter invocation for a script at the target root
fn invocation(target: &TargetDir, script: &str) -> Invocation {
    let base = if cfg!(windows) {
        Invocation::new("cmd").arg("/C")
    } else {
        Invocation::new("sh")
    };
    base.arg(script).current_dir(target.root())
}

/// Run the platform's finalize script and wait for it
pub fn run_finalizer(
    runner: &dyn ProcessRunner,
    target: &TargetDir,
    scripts: &PlatformNames,
) -> Result<FinalizeOutcome> {
    let name = scripts.current();
    let script = target.join(name);
    if !script.is_file() {
        return Err(PatchError::ScriptMissing {
            path: name.to_string(),
        });
    }

    let outcome = runner
        .run(&invocation(target, name), WaitMode::Blocking)
        .map_err(|e| PatchError::ScriptFailed {
            path: script.display().to_string(),
            reason: e.to_string(),
        })?;

    let exit_code = match outcome {
        RunOutcome::Exited(code) => code,
        RunOutcome::Spawned => Some(0),
    };
    let outcome = FinalizeOutcome { script, exit_code };

    match outcome.warning() {
        Some(warning) => warn!("{warning}"),
        None => info!(script = %outcome.script.display(), "finalize script completed"),
    }
    Ok(outcome)
}
