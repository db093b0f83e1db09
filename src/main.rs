//! ntpatch - patch installer with backup and restore
//!
//! Snapshots a NEOTOKYO installation folder, applies the patch archives over
//! it, runs the bundled finalize script and writes a patch list. The newest
//! snapshot can be restored at any time.

use clap::Parser;

mod archive;
mod cli;
mod commands;
mod config;
mod error;
mod finalizer;
mod hash;
mod launcher;
mod logging;
mod manifest;
mod operations;
mod overlay;
mod process;
mod resources;
mod restore;
mod snapshot;
mod ui;
mod validator;

use cli::{Cli, Commands};
use commands::helpers::GlobalArgs;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let globals = GlobalArgs {
        target: cli.target,
        resources: cli.resources,
        config: cli.config,
    };

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(&globals, args),
        Commands::Backup => commands::backup::run(&globals),
        Commands::Restore(args) => commands::restore::run(&globals, args),
        Commands::Backups(args) => commands::backups::run(&globals, args),
        Commands::Launch => commands::launch::run(&globals),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
