//! # Revision Status
//!
//! Status types for tracking revision health through conditions.

use crate::error::RevisionError;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of the Revision resource
///
/// The condition list is owned by the condition engine; see
/// [`crate::revision`] for the operations that mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevisionStatus {
    /// Name of the Kubernetes Service fronting this revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// URL where the revision's logs can be browsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_url: Option<String>,
    /// Generation last acted upon by the reconciler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    /// Conditions represent the latest available observations, sorted by type
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl RevisionStatus {
    /// Parse a status document; YAML is a superset of JSON so both are accepted
    pub fn from_yaml(document: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(document)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Condition represents one observed aspect of a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition
    #[serde(default)]
    pub r#type: String,
    /// Status of the condition
    #[serde(default)]
    pub status: ConditionStatus,
    /// Machine-readable reason for the status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Message describing the condition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Last time the status changed value (RFC3339)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::time::serialize_optional",
        deserialize_with = "super::time::deserialize_optional"
    )]
    #[schemars(with = "Option<String>")]
    pub last_transition_time: Option<DateTime<Utc>>,
}

impl Condition {
    pub fn new(condition_type: impl Into<String>, status: ConditionStatus) -> Self {
        Self {
            r#type: condition_type.into(),
            status,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_last_transition_time(mut self, time: DateTime<Utc>) -> Self {
        self.last_transition_time = Some(time);
        self
    }

    /// A condition without a type carries nothing to record
    pub fn is_empty(&self) -> bool {
        self.r#type.is_empty()
    }

    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }

    pub fn is_false(&self) -> bool {
        self.status == ConditionStatus::False
    }

    pub fn is_unknown(&self) -> bool {
        self.status == ConditionStatus::Unknown
    }
}

/// Tri-state condition status
///
/// A missing status on the wire reads as `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

impl ConditionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionStatus {
    type Err = RevisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "True" => Ok(ConditionStatus::True),
            "False" => Ok(ConditionStatus::False),
            "Unknown" => Ok(ConditionStatus::Unknown),
            other => Err(RevisionError::InvalidConditionStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_condition_status_wire_strings() {
        for (status, wire) in [
            (ConditionStatus::True, "\"True\""),
            (ConditionStatus::False, "\"False\""),
            (ConditionStatus::Unknown, "\"Unknown\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
        }
    }

    #[test]
    fn test_condition_status_from_str_rejects_lowercase() {
        assert_eq!("False".parse::<ConditionStatus>(), Ok(ConditionStatus::False));
        assert_eq!(
            "true".parse::<ConditionStatus>(),
            Err(RevisionError::InvalidConditionStatus("true".to_string()))
        );
    }

    #[test]
    fn test_condition_serializes_camel_case_fields() {
        let time = Utc.with_ymd_and_hms(2018, 5, 1, 12, 0, 0).unwrap();
        let condition = Condition::new("ContainerHealthy", ConditionStatus::False)
            .with_reason("ContainerMissing")
            .with_message("image not found")
            .with_last_transition_time(time);

        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "ContainerHealthy",
                "status": "False",
                "reason": "ContainerMissing",
                "message": "image not found",
                "lastTransitionTime": "2018-05-01T12:00:00Z"
            })
        );
    }

    #[test]
    fn test_condition_missing_status_reads_as_unknown() {
        let condition: Condition = serde_json::from_str(r#"{"type": "Ready"}"#).unwrap();
        assert!(condition.is_unknown());
        assert_eq!(condition.last_transition_time, None);
    }

    #[test]
    fn test_condition_rejects_malformed_timestamp() {
        let result = serde_json::from_str::<Condition>(
            r#"{"type": "Ready", "status": "True", "lastTransitionTime": "yesterday"}"#,
        );
        assert!(result.is_err());
    }
}
