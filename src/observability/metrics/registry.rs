//! # Metrics Registry
//!
//! Prometheus metrics registry setup and registration.

use anyhow::Result;
use prometheus::{Encoder, Registry, TextEncoder};
use std::sync::LazyLock;

/// Global Prometheus metrics registry
pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Register all metrics with the Prometheus registry
///
/// Counters record even when unregistered, so embedding the engine without
/// calling this is fine; registration only controls exposition.
///
/// # Errors
///
/// Fails if a metric is already registered, e.g. when called twice.
pub fn register_metrics() -> Result<()> {
    super::condition_metrics::register_condition_metrics()?;
    Ok(())
}

/// Render every registered metric in the Prometheus text format
///
/// # Errors
///
/// Fails if encoding fails or the output is not valid UTF-8.
pub fn gather_metrics() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
