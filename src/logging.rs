//! Diagnostic logging
//!
//! `tracing` output goes to stderr so NDJSON on stdout stays clean.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter for a `-v` count; `RUST_LOG` wins when set.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "spartan=warn",
        1 => "spartan=info",
        _ => "spartan=debug",
    }
}

pub fn init(verbose: u8) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
