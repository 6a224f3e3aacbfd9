//! Logging setup on top of `tracing-subscriber`

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging to stderr.
///
/// `RUST_LOG` takes precedence when set (e.g. `RUST_LOG=hwo_navigator=trace`);
/// otherwise the level is `info`, or `debug` when `verbose`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Logging for tests; safe to call more than once
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
