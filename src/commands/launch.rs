//! Launch command: hand the configured identifier to the OS

use crate::commands::helpers::{GlobalArgs, Session};
use crate::error::Result;
use crate::launcher;
use crate::process::SystemProcessRunner;

/// Run launch command
pub fn run(globals: &GlobalArgs) -> Result<()> {
    let session = Session::open(globals)?;
    launcher::launch(&SystemProcessRunner, &session.config.launch_uri)?;
    println!("Launching {}", session.config.launch_uri);
    Ok(())
}
