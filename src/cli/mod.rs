//! CLI definitions using clap derive API
//!
//! Argument types live in one submodule per command:
//! - install: Install command arguments
//! - restore: Restore command arguments
//! - backups: Backup listing arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod backups;
pub mod completions;
pub mod install;
pub mod restore;

pub use backups::BackupsArgs;
pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use restore::RestoreArgs;

/// ntpatch - NEOTOKYO patch installer
///
/// Backs up an installation folder, extracts the patch archives over it and
/// can roll it back to the newest backup.
#[derive(Parser, Debug)]
#[command(
    name = "ntpatch",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Patch installer with backup and restore for NEOTOKYO",
    long_about = "ntpatch snapshots a game installation folder, applies an ordered set of \
                  overlay archives on top of it, runs the bundled finalize script and writes \
                  a patch list. The newest snapshot can be restored at any time.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  ntpatch -t ~/NEOTOKYO install          \x1b[90m# Back up and patch (asks first)\x1b[0m\n   \
                  ntpatch -t ~/NEOTOKYO install -y       \x1b[90m# Accept every default\x1b[0m\n   \
                  ntpatch -t ~/NEOTOKYO restore          \x1b[90m# Roll back to the newest backup\x1b[0m\n   \
                  ntpatch -t ~/NEOTOKYO backups          \x1b[90m# List backups\x1b[0m\n   \
                  ntpatch launch                         \x1b[90m# Start the game through Steam\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Installation folder to patch (defaults to current directory)
    #[arg(long, short = 't', global = true, env = "NTPATCH_TARGET")]
    pub target: Option<PathBuf>,

    /// Directory holding the patch archives and client.dll
    #[arg(long, short = 'r', global = true, env = "NTPATCH_RESOURCES")]
    pub resources: Option<PathBuf>,

    /// Extra configuration file, applied over ntpatch.yaml
    #[arg(long, short = 'c', global = true, env = "NTPATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Back up, apply the patches and run the finalize script
    Install(InstallArgs),

    /// Create a backup of the installation folder
    Backup,

    /// Restore the installation folder from its newest backup
    Restore(RestoreArgs),

    /// List backups, newest first
    Backups(BackupsArgs),

    /// Start the game through the OS
    Launch,

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
