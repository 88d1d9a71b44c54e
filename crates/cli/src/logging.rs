//! Subscriber installation for filter diagnostics.
//!
//! The library crates only emit `tracing` events. This module wires them to
//! stderr once per process so `--verbose` surfaces every dropped field.

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// Without `RUST_LOG`, the default level is INFO when `verbose` is set and
/// WARN otherwise. A subscriber that is already installed is left in place,
/// which keeps repeated calls from tests harmless.
#[cfg(feature = "tracing")]
pub fn init_tracing(verbose: bool) {
    use std::io::{self, IsTerminal};

    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::filter::LevelFilter;

    let default_level = if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .with_level(false)
        .try_init();
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn init_tracing(_verbose: bool) {}
