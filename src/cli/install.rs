use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Patch with prompts:\n    ntpatch -t ~/NEOTOKYO install\n\n\
                   Patch without asking (backup on, safe mode off):\n    ntpatch -t ~/NEOTOKYO install -y\n\n\
                   Streamer setup:\n    ntpatch -t ~/NEOTOKYO install --backup --safe-mode\n\n\
                   Patch without a backup:\n    ntpatch -t ~/NEOTOKYO install --no-backup -y")]
pub struct InstallArgs {
    /// Back up the folder before patching
    #[arg(long, overrides_with = "no_backup")]
    pub backup: bool,

    /// Skip the backup
    #[arg(long, overrides_with = "backup")]
    pub no_backup: bool,

    /// Also apply the safe-mode (streamsafe) overlay
    #[arg(long, overrides_with = "no_safe_mode")]
    pub safe_mode: bool,

    /// Do not apply the safe-mode overlay
    #[arg(long, overrides_with = "safe_mode")]
    pub no_safe_mode: bool,

    /// Open the patch list when done
    #[arg(long)]
    pub open_manifest: bool,

    /// Accept the default answer to every question
    #[arg(long, short = 'y')]
    pub yes: bool,
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl InstallArgs {
    pub fn backup_choice(&self) -> Option<bool> {
        flag_pair(self.backup, self.no_backup)
    }

    pub fn safe_mode_choice(&self) -> Option<bool> {
        flag_pair(self.safe_mode, self.no_safe_mode)
    }

    pub fn open_manifest_choice(&self) -> Option<bool> {
        self.open_manifest.then_some(true)
    }
}
