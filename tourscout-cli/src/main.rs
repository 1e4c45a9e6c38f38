//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use eyre::WrapErr;

fn main() -> eyre::Result<()> {
    tourscout_cli::init_tracing();
    tourscout_cli::run().wrap_err("tourscout failed")
}
