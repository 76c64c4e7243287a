//! Diagnostic logging to stderr.
//!
//! Level precedence: `RUST_LOG`, then `-v` flags, then `log_level` in the
//! configuration file.

use tracing_subscriber::EnvFilter;

/// Level selected by the number of `-v` flags, if any.
pub fn level_for_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

pub fn init(verbose: u8, configured: &str) {
    let fallback = level_for_verbosity(verbose).unwrap_or(configured);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second initialisation (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
