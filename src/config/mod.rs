//! # Configuration
//!
//! Controller-level configuration loaded from environment variables, and
//! per-component log levels read from a logging ConfigMap.
//!
//! All configuration has sensible defaults and can be overridden via environment variables.

mod controller;
mod logging;

pub use controller::ControllerConfig;
pub use logging::LoggingConfig;
