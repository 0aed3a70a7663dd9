//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Filter for a `-v` count, falling back to the configured level
fn level_for(verbosity: u8, configured: &str) -> &str {
    match verbosity {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber; `RUST_LOG` wins over flags and config
pub(crate) fn init(verbosity: u8, configured: &str) {
    let level = level_for(verbosity, configured);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(level))
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
