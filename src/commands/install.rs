//! Install command CLI wrapper
//!
//! Resolves the session and delegates all business logic to
//! operations/install.

use crate::cli::InstallArgs;
use crate::commands::helpers::{self, GlobalArgs, Session};
use crate::error::Result;
use crate::operations::install::display;
use crate::operations::{InstallOperation, InstallOptions};
use crate::process::SystemProcessRunner;
use crate::ui;

impl From<&InstallArgs> for InstallOptions {
    fn from(args: &InstallArgs) -> Self {
        Self {
            backup: args.backup_choice(),
            safe_mode: args.safe_mode_choice(),
            open_manifest: args.open_manifest_choice(),
        }
    }
}

/// Run install command
pub fn run(globals: &GlobalArgs, args: InstallArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let prompter = helpers::prompter(args.yes);
    let runner = SystemProcessRunner;

    let mut operation = InstallOperation::new(
        &session.config,
        &session.resources,
        prompter.as_ref(),
        &runner,
        ui::reporter_for_terminal(),
        InstallOptions::from(&args),
    );
    let summary = operation.execute(&session.target)?;
    display::print_summary(&summary);
    Ok(())
}
