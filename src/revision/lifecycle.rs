//! # Revision Lifecycle
//!
//! Condition operations on [`RevisionStatus`].
//!
//! Ready is derived from the dependents in priority order:
//!
//! 1. `BuildSucceeded` (only once tracked via `initialize_build_condition`)
//! 2. `ResourcesAvailable`
//! 3. `ContainerHealthy`
//!
//! `Active` is seeded alongside them but describes a separate axis (serving
//! vs scaled to zero) and never affects Ready.

use crate::conditions::{ConditionManager, ConditionSet};
use crate::constants::{
    CONDITION_ACTIVE, CONDITION_BUILD_SUCCEEDED, CONDITION_CONTAINER_HEALTHY, CONDITION_READY,
    CONDITION_RESOURCES_AVAILABLE, MESSAGE_SERVICE_TIMEOUT, PENDING_DEACTIVATION_SECONDS,
    REASON_BUILDING, REASON_CONTAINER_MISSING, REASON_DEACTIVATING,
    REASON_PROGRESS_DEADLINE_EXCEEDED, REASON_SERVICE_TIMEOUT,
};
use crate::crd::{BuildStatus, Condition, ConditionStatus, RevisionStatus};
use chrono::{DateTime, Duration, Utc};
use std::sync::LazyLock;
use tracing::debug;

/// Condition vocabulary of a Revision
pub static REVISION_CONDITION_SET: LazyLock<ConditionSet> = LazyLock::new(|| {
    ConditionSet::new(CONDITION_READY)
        .with_optional_dependent(CONDITION_BUILD_SUCCEEDED)
        .with_dependent(CONDITION_RESOURCES_AVAILABLE)
        .with_dependent(CONDITION_CONTAINER_HEALTHY)
        .with_independent(CONDITION_ACTIVE)
});

impl RevisionStatus {
    fn manage(&mut self) -> ConditionManager<'_> {
        REVISION_CONDITION_SET.manage(&mut self.conditions)
    }

    pub fn get_condition(&self, condition_type: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.r#type == condition_type)
    }

    fn condition_status(&self, condition_type: &str) -> Option<ConditionStatus> {
        self.get_condition(condition_type).map(|c| c.status)
    }

    pub fn is_ready(&self) -> bool {
        self.condition_status(CONDITION_READY) == Some(ConditionStatus::True)
    }

    /// Whether requests may be routed to this revision
    ///
    /// A revision that is not ready only because it has been deactivated is
    /// still routable: a request reaching it triggers reactivation.
    pub fn is_routable(&self) -> bool {
        match self.condition_status(CONDITION_READY) {
            Some(ConditionStatus::True) => true,
            Some(ConditionStatus::False) => {
                self.condition_status(CONDITION_ACTIVE) == Some(ConditionStatus::False)
            }
            _ => false,
        }
    }

    /// Absence of the Active condition means active
    pub fn is_active(&self) -> bool {
        matches!(
            self.condition_status(CONDITION_ACTIVE),
            None | Some(ConditionStatus::True)
        )
    }

    /// Whether an inactive revision has stayed inactive past the grace period
    pub fn is_safe_to_tear_down_resources(&self, now: DateTime<Utc>) -> bool {
        self.is_safe_to_tear_down_resources_after(now, Duration::seconds(PENDING_DEACTIVATION_SECONDS))
    }

    /// Same as [`Self::is_safe_to_tear_down_resources`] with an explicit grace period
    ///
    /// An inactive condition without a transition time counts as having
    /// transitioned long ago.
    pub fn is_safe_to_tear_down_resources_after(&self, now: DateTime<Utc>, grace: Duration) -> bool {
        let Some(active) = self.get_condition(CONDITION_ACTIVE) else {
            return false;
        };
        if active.is_true() {
            return false;
        }
        match active.last_transition_time {
            Some(transitioned) => now.signed_duration_since(transitioned) >= grace,
            None => true,
        }
    }

    /// Seed the dependent and Active conditions as `Unknown`
    ///
    /// Idempotent: existing conditions are never reset.
    pub fn initialize_conditions(&mut self, now: DateTime<Utc>) {
        self.manage().initialize(now);
    }

    /// Track BuildSucceeded as a dependent of Ready
    pub fn initialize_build_condition(&mut self, now: DateTime<Utc>) {
        self.manage().track(CONDITION_BUILD_SUCCEEDED, now);
    }

    pub fn set_condition(&mut self, condition: Condition, now: DateTime<Utc>) {
        self.manage().set_condition(condition, now);
    }

    pub fn mark_active(&mut self, now: DateTime<Utc>) {
        self.manage().mark_true(CONDITION_ACTIVE, now);
    }

    /// Enter the pending-deactivation window
    pub fn mark_inactive_pending(&mut self, now: DateTime<Utc>) {
        self.manage()
            .mark_unknown(CONDITION_ACTIVE, REASON_DEACTIVATING, "", now);
    }

    pub fn mark_inactive(&mut self, reason: &str, message: &str, now: DateTime<Utc>) {
        self.manage().mark_false(CONDITION_ACTIVE, reason, message, now);
    }

    pub fn mark_container_healthy(&mut self, now: DateTime<Utc>) {
        self.manage().mark_true(CONDITION_CONTAINER_HEALTHY, now);
    }

    pub fn mark_resources_available(&mut self, now: DateTime<Utc>) {
        self.manage().mark_true(CONDITION_RESOURCES_AVAILABLE, now);
    }

    pub fn mark_container_missing(&mut self, message: &str, now: DateTime<Utc>) {
        self.manage().mark_false(
            CONDITION_CONTAINER_HEALTHY,
            REASON_CONTAINER_MISSING,
            message,
            now,
        );
    }

    pub fn mark_service_timeout(&mut self, now: DateTime<Utc>) {
        self.manage().mark_false(
            CONDITION_RESOURCES_AVAILABLE,
            REASON_SERVICE_TIMEOUT,
            MESSAGE_SERVICE_TIMEOUT,
            now,
        );
    }

    pub fn mark_progress_deadline_exceeded(&mut self, message: &str, now: DateTime<Utc>) {
        self.manage().mark_false(
            CONDITION_RESOURCES_AVAILABLE,
            REASON_PROGRESS_DEADLINE_EXCEEDED,
            message,
            now,
        );
    }

    /// Put both rollout axes back into `Unknown`, even if one was `True`
    pub fn mark_deploying(&mut self, reason: &str, now: DateTime<Utc>) {
        let mut manager = self.manage();
        manager.mark_unknown(CONDITION_RESOURCES_AVAILABLE, reason, "", now);
        manager.mark_unknown(CONDITION_CONTAINER_HEALTHY, reason, "", now);
    }

    /// Mirror the build's `Succeeded` condition onto BuildSucceeded
    ///
    /// A build that has not reported `Succeeded` yet leaves the status alone.
    pub fn propagate_build_status(&mut self, build: &BuildStatus, now: DateTime<Utc>) {
        let Some(succeeded) = build.succeeded_condition() else {
            debug!("build status carries no Succeeded condition, keeping BuildSucceeded as is");
            return;
        };
        let reason = succeeded.reason.clone().unwrap_or_default();
        let message = succeeded.message.clone().unwrap_or_default();

        let mut manager = self.manage();
        match succeeded.status {
            ConditionStatus::Unknown => {
                let reason = if reason.is_empty() {
                    REASON_BUILDING.to_string()
                } else {
                    reason
                };
                manager.mark_unknown(CONDITION_BUILD_SUCCEEDED, reason, message, now);
            }
            ConditionStatus::True => manager.mark_true(CONDITION_BUILD_SUCCEEDED, now),
            ConditionStatus::False => {
                manager.mark_false(CONDITION_BUILD_SUCCEEDED, reason, message, now);
            }
        }
    }
}
