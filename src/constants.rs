//! # Constants
//!
//! Condition vocabulary, reasons, and defaults shared across the crate.

/// Aggregate condition summarizing every dependent condition
pub const CONDITION_READY: &str = "Ready";

/// Tracks whether the associated build (if any) has completed successfully
pub const CONDITION_BUILD_SUCCEEDED: &str = "BuildSucceeded";

/// Tracks whether the backing deployment and service have been provisioned
pub const CONDITION_RESOURCES_AVAILABLE: &str = "ResourcesAvailable";

/// Tracks whether the user container is present and healthy
pub const CONDITION_CONTAINER_HEALTHY: &str = "ContainerHealthy";

/// Tracks whether the revision is serving or scaled to zero
/// Seeded with the dependents but never folded into Ready
pub const CONDITION_ACTIVE: &str = "Active";

/// Condition type reported by the build subsystem
pub const BUILD_CONDITION_SUCCEEDED: &str = "Succeeded";

// Reasons
pub const REASON_BUILDING: &str = "Building";
pub const REASON_CONTAINER_MISSING: &str = "ContainerMissing";
pub const REASON_SERVICE_TIMEOUT: &str = "ServiceTimeout";
pub const REASON_PROGRESS_DEADLINE_EXCEEDED: &str = "ProgressDeadlineExceeded";
pub const REASON_DEACTIVATING: &str = "Deactivating";

pub const MESSAGE_SERVICE_TIMEOUT: &str = "Timed out waiting for a service endpoint to become ready";

/// Grace period a revision must stay inactive before its resources may be torn down
pub const PENDING_DEACTIVATION_SECONDS: i64 = 300;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "revision_condition_manager=info";

/// ConfigMap key prefix for per-component log levels (`loglevel.<component>`)
pub const LOG_LEVEL_KEY_PREFIX: &str = "loglevel.";
