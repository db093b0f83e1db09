use clap::Parser;

/// Arguments for the backups command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List backups:\n    ntpatch -t ~/NEOTOKYO backups\n\n\
                  Machine-readable output:\n    ntpatch -t ~/NEOTOKYO backups --json")]
pub struct BackupsArgs {
    /// Print the list as JSON
    #[arg(long)]
    pub json: bool,
}
