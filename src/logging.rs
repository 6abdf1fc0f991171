//! Log output for the command-line tool.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary. `RUST_LOG` overrides the default level.

use tracing_subscriber::EnvFilter;

/// Installs a stderr fmt subscriber. Returns false if one was already set.
pub fn init_logging(verbose: bool) -> bool {
    let default_level = if verbose { "rihla=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
