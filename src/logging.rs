//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (the config's
/// `log_level`) is used, falling back to `info` if it does not parse.
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed (e.g. by an embedding binary).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
