//! Logging setup for FitForge.
//!
//! Every binary goes through here so filtering behaves the same everywhere.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used by [`init`] when `RUST_LOG` is unset
pub const DEFAULT_LEVEL: &str = "info";

/// Initialize logging at [`DEFAULT_LEVEL`]
///
/// `RUST_LOG` still takes precedence when set.
pub fn init() {
    init_with_level(DEFAULT_LEVEL)
}

/// Initialize logging with a specific default level
///
/// # Arguments
/// * `default_level` - Default filter directive (e.g. `debug`, `forge_core=trace`)
///
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

/// Initialize logging for unit tests (output captured per test)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
