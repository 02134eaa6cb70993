//! # Logging
//!
//! Tracing subscriber setup for the binaries. The library itself only emits
//! `tracing` events and never installs a subscriber.

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` is used (for
/// example directives built by [`crate::config::LoggingConfig`]).
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        // Already installed by an embedding process
        warn!("Tracing subscriber init returned error: {}", e);
    }
}
