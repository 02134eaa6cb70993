//! # Metrics Module
//!
//! Prometheus metrics for the condition engine.
//!
//! ## Sub-modules
//!
//! - `registry` - Metrics registry setup, registration and text exposition
//! - `condition_metrics` - Condition transitions and Ready evaluations

pub mod condition_metrics;
pub mod registry;

pub use condition_metrics::*;
pub use registry::*;
