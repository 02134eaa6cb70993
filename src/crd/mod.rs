//! # Custom Resource Definitions
//!
//! CRD types for serving revisions.
//!
//! The `Revision` resource is an immutable snapshot of a workload's code and
//! configuration. Its status carries the conditions maintained by
//! [`crate::revision`].

mod build;
mod status;
pub mod time;

pub use build::{BuildCondition, BuildStatus};
pub use status::{Condition, ConditionStatus, RevisionStatus};

use chrono::{DateTime, Utc};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Revision Custom Resource Definition
///
/// # Example
///
/// ```yaml
/// apiVersion: serving.microscaler.io/v1alpha1
/// kind: Revision
/// metadata:
///   name: hello-00001
///   namespace: default
/// spec:
///   image: registry.example.com/hello:1.0
///   buildName: hello-build-00001
///   servingState: Active
/// ```
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "Revision",
    group = "serving.microscaler.io",
    version = "v1alpha1",
    namespaced,
    status = "RevisionStatus",
    shortname = "rev",
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}, {"name":"Reason", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].reason"}, {"name":"Serving State", "type":"string", "jsonPath":".spec.servingState"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct RevisionSpec {
    /// Container image to run
    pub image: String,
    /// Name of the build that produces the image
    /// When set, the BuildSucceeded condition gates readiness
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_name: Option<String>,
    /// Desired serving state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_state: Option<ServingState>,
}

/// Desired serving state of a revision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum ServingState {
    /// Serving traffic with resources provisioned
    #[default]
    Active,
    /// Scaled to zero; requests are routed to the activator
    Reserve,
    /// No longer routable; resources may be reclaimed
    Retired,
}

impl Revision {
    /// Whether this revision is configured to run a build step
    pub fn requires_build(&self) -> bool {
        self.spec.build_name.as_deref().is_some_and(|name| !name.is_empty())
    }

    /// Seed the status conditions for this revision
    ///
    /// The build condition is tracked only when a build is configured.
    pub fn initialize_status(&mut self, now: DateTime<Utc>) {
        let requires_build = self.requires_build();
        let status = self.status.get_or_insert_with(RevisionStatus::default);
        status.initialize_conditions(now);
        if requires_build {
            status.initialize_build_condition(now);
        }
    }

    /// `metadata.generation`, or 0 when the API server has not assigned one
    pub fn generation(&self) -> i64 {
        self.metadata.generation.unwrap_or(0)
    }

    pub fn set_generation(&mut self, generation: i64) {
        self.metadata.generation = Some(generation);
    }
}
