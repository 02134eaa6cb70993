//! # Condition Metrics
//!
//! Metrics for condition engine activity: status transitions per condition
//! type and the outcome of each Ready recomputation.

use crate::observability::metrics::registry::REGISTRY;
use anyhow::Result;
use prometheus::IntCounterVec;
use std::sync::LazyLock;

/// `type` label for condition types outside a condition set's vocabulary
pub const OTHER_CONDITION_TYPE_LABEL: &str = "Other";

static CONDITION_TRANSITIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "revision_condition_transitions_total",
            "Total number of condition status transitions",
        ),
        &["type", "status"],
    )
    .expect("Failed to create CONDITION_TRANSITIONS_TOTAL metric - this should never happen")
});

static READY_EVALUATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "revision_ready_evaluations_total",
            "Total number of Ready recomputations by resulting status",
        ),
        &["status"],
    )
    .expect("Failed to create READY_EVALUATIONS_TOTAL metric - this should never happen")
});

/// Register condition metrics with the registry
pub(crate) fn register_condition_metrics() -> Result<()> {
    REGISTRY.register(Box::new(CONDITION_TRANSITIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(READY_EVALUATIONS_TOTAL.clone()))?;
    Ok(())
}

pub fn increment_condition_transitions(condition_type: &str, status: &str) {
    CONDITION_TRANSITIONS_TOTAL
        .with_label_values(&[condition_type, status])
        .inc();
}

/// Current transition count for one label pair
pub fn condition_transitions_total(condition_type: &str, status: &str) -> u64 {
    CONDITION_TRANSITIONS_TOTAL
        .with_label_values(&[condition_type, status])
        .get()
}

pub fn increment_ready_evaluations(status: &str) {
    READY_EVALUATIONS_TOTAL.with_label_values(&[status]).inc();
}
