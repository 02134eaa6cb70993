//! # Build Status
//!
//! The status shape reported by the external build subsystem. Only the
//! `Succeeded` condition is consumed, by `RevisionStatus::propagate_build_status`.

use super::status::ConditionStatus;
use crate::constants::BUILD_CONDITION_SUCCEEDED;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Status of a build as observed on the build resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildStatus {
    #[serde(default)]
    pub conditions: Vec<BuildCondition>,
}

/// Condition reported by the build subsystem
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildCondition {
    pub r#type: String,
    #[serde(default)]
    pub status: ConditionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BuildStatus {
    /// Build status carrying only a `Succeeded` condition
    pub fn succeeded(status: ConditionStatus) -> Self {
        Self {
            conditions: vec![BuildCondition {
                r#type: BUILD_CONDITION_SUCCEEDED.to_string(),
                status,
                reason: None,
                message: None,
            }],
        }
    }

    /// The terminal `Succeeded` condition, if the build has reported one
    pub fn succeeded_condition(&self) -> Option<&BuildCondition> {
        self.conditions
            .iter()
            .find(|c| c.r#type == BUILD_CONDITION_SUCCEEDED)
    }
}
