//! Hand an application identifier (e.g. `steam://run/244630`) to the OS
//!
//! The launched process is never tracked; the opener is started detached.

use tracing::info;

use crate::error::{PatchError, Result};
use crate::process::{Invocation, ProcessRunner, WaitMode};

/// Opener invocation for the current platform
pub fn opener(identifier: &str) -> Invocation {
    if cfg!(windows) {
        // `start` treats the first quoted argument as the window title
        Invocation::new("cmd").arg("/C").arg("start").arg("").arg(identifier)
    } else if cfg!(target_os = "macos") {
        Invocation::new("open").arg(identifier)
    } else {
        Invocation::new("xdg-open").arg(identifier)
    }
}

pub fn launch(runner: &dyn ProcessRunner, identifier: &str) -> Result<()> {
    if identifier.trim().is_empty() {
        return Err(PatchError::LaunchFailed {
            target: identifier.to_string(),
            reason: "no launch identifier configured".to_string(),
        });
    }

    runner
        .run(&opener(identifier), WaitMode::Detached)
        .map_err(|e| PatchError::LaunchFailed {
            target: identifier.to_string(),
            reason: e.to_string(),
        })?;
    info!(identifier, "launch handed to the OS");
    Ok(())
}
