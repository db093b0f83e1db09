//! Diagnostic logging setup
//!
//! Log events go to stderr so they never mix with command output. The
//! filter comes from `NTPATCH_LOG` (standard `EnvFilter` syntax), otherwise
//! `debug` with `--verbose` and `warn` without.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "NTPATCH_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "ntpatch=debug" } else { "warn" }
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber; later calls keep the first one
pub fn init(verbose: bool) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(verbose)
        .try_init();

    // The only failure is a global subscriber that is already set
    if let Err(err) = installed {
        tracing::debug!(%err, "log subscriber already installed");
    }
}
