use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    ntpatch completions --shell bash > ~/.bash_completion.d/ntpatch\n\n\
                  Generate zsh completions:\n    ntpatch completions --shell zsh > ~/.zfunc/_ntpatch\n\n\
                  Generate fish completions:\n    ntpatch completions --shell fish > ~/.config/fish/completions/ntpatch.fish\n\n\
                  Generate PowerShell completions:\n    ntpatch completions --shell powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long, short = 's', value_enum, ignore_case = true)]
    pub shell: Shell,
}
