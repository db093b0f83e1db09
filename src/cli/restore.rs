use clap::Parser;

/// Arguments for the restore command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Restore the newest backup:\n    ntpatch -t ~/NEOTOKYO restore\n\n\
                  Restore without confirmation:\n    ntpatch -t ~/NEOTOKYO restore -y\n\n\
                  Only put back the backed-up files:\n    ntpatch -t ~/NEOTOKYO restore --keep-extra")]
pub struct RestoreArgs {
    /// Keep files that were added after the backup
    #[arg(long)]
    pub keep_extra: bool,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}
