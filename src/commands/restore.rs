//! Restore command CLI wrapper

use crate::cli::RestoreArgs;
use crate::commands::helpers::{self, GlobalArgs, Session};
use crate::error::Result;
use crate::operations::RestoreOperation;
use crate::restore::RestoreOptions;

/// Run restore command
pub fn run(globals: &GlobalArgs, args: RestoreArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let prompter = helpers::prompter(args.yes);
    let options = RestoreOptions {
        prune: !args.keep_extra,
    };

    RestoreOperation::new(&session.config, prompter.as_ref(), options).execute(&session.target)?;
    Ok(())
}
