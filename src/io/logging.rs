//! Tracing subscriber setup for the command-line tool

use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Log level implied by the `--quiet` and `--verbose` flags
pub const fn level_for(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::WARN;
    }
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install a stderr subscriber
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this more than
/// once keeps the first subscriber.
pub fn init(default_level: LevelFilter) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_writer(std::io::stderr);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
