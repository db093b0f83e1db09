//! Backup command: snapshot the target without patching

use console::Style;

use crate::commands::helpers::{GlobalArgs, Session};
use crate::error::Result;
use crate::snapshot;
use crate::ui;
use crate::validator;

/// Run backup command
pub fn run(globals: &GlobalArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let target = validator::validate(&session.target, &session.config.marker)?;

    let mut progress = ui::reporter_for_terminal();
    let handle = snapshot::snapshot(&target, &session.config.snapshot_prefix, progress.as_mut())?;

    println!(
        "{} {} ({} files)",
        Style::new().bold().green().apply_to("Backup created:"),
        handle.path.display(),
        handle.files
    );
    Ok(())
}
