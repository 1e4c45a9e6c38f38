//! Diagnostic output for the binary.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub(crate) const LOG_ENV: &str = "TOURSCOUT_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Install the global `tracing` subscriber.
///
/// Filter directives come from `TOURSCOUT_LOG` and default to `info`. Output
/// goes to stderr so stdout carries only JSON responses. Records emitted
/// through the `log` facade by the library crates are forwarded as well.
/// Calling this twice leaves the first subscriber in place.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
