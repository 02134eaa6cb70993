//! # Operations
//!
//! A textual form of every status mutation, used by `revisionctl` to replay a
//! sequence of observations against a status document.
//!
//! Tokens are `name[:arg[:arg]]`; the last argument may itself contain `:`.

use crate::crd::{BuildCondition, BuildStatus, ConditionStatus, RevisionStatus};
use crate::constants::BUILD_CONDITION_SUCCEEDED;
use crate::error::RevisionError;
use chrono::{DateTime, Utc};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    InitializeConditions,
    InitializeBuildCondition,
    MarkActive,
    MarkInactivePending,
    MarkInactive { reason: String, message: String },
    MarkContainerHealthy,
    MarkResourcesAvailable,
    MarkContainerMissing { message: String },
    MarkServiceTimeout,
    MarkProgressDeadlineExceeded { message: String },
    MarkDeploying { reason: String },
    PropagateBuildStatus {
        status: ConditionStatus,
        reason: Option<String>,
        message: Option<String>,
    },
}

impl Operation {
    pub fn apply(&self, status: &mut RevisionStatus, now: DateTime<Utc>) {
        match self {
            Operation::InitializeConditions => status.initialize_conditions(now),
            Operation::InitializeBuildCondition => status.initialize_build_condition(now),
            Operation::MarkActive => status.mark_active(now),
            Operation::MarkInactivePending => status.mark_inactive_pending(now),
            Operation::MarkInactive { reason, message } => status.mark_inactive(reason, message, now),
            Operation::MarkContainerHealthy => status.mark_container_healthy(now),
            Operation::MarkResourcesAvailable => status.mark_resources_available(now),
            Operation::MarkContainerMissing { message } => status.mark_container_missing(message, now),
            Operation::MarkServiceTimeout => status.mark_service_timeout(now),
            Operation::MarkProgressDeadlineExceeded { message } => {
                status.mark_progress_deadline_exceeded(message, now);
            }
            Operation::MarkDeploying { reason } => status.mark_deploying(reason, now),
            Operation::PropagateBuildStatus {
                status: build_status,
                reason,
                message,
            } => {
                let build = BuildStatus {
                    conditions: vec![BuildCondition {
                        r#type: BUILD_CONDITION_SUCCEEDED.to_string(),
                        status: *build_status,
                        reason: reason.clone(),
                        message: message.clone(),
                    }],
                };
                status.propagate_build_status(&build, now);
            }
        }
    }
}

impl FromStr for Operation {
    type Err = RevisionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (name, args) = match token.split_once(':') {
            Some((name, rest)) => (name, Some(rest)),
            None => (token, None),
        };
        let required = |argument: &'static str| -> Result<String, RevisionError> {
            args.filter(|a| !a.is_empty())
                .map(str::to_string)
                .ok_or_else(|| RevisionError::MissingArgument {
                    operation: name.to_string(),
                    argument,
                })
        };

        let operation = match name {
            "initialize" => Operation::InitializeConditions,
            "initialize-build" => Operation::InitializeBuildCondition,
            "mark-active" => Operation::MarkActive,
            "mark-inactive-pending" => Operation::MarkInactivePending,
            "mark-inactive" => {
                let raw = required("reason")?;
                let (reason, message) = split_optional(&raw);
                Operation::MarkInactive {
                    reason,
                    message: message.unwrap_or_default(),
                }
            }
            "mark-container-healthy" => Operation::MarkContainerHealthy,
            "mark-resources-available" => Operation::MarkResourcesAvailable,
            "mark-container-missing" => Operation::MarkContainerMissing {
                message: required("message")?,
            },
            "mark-service-timeout" => Operation::MarkServiceTimeout,
            "mark-progress-deadline-exceeded" => Operation::MarkProgressDeadlineExceeded {
                message: required("message")?,
            },
            "mark-deploying" => Operation::MarkDeploying {
                reason: required("reason")?,
            },
            "propagate-build" => {
                let raw = required("status")?;
                let (status, rest) = split_optional(&raw);
                let (reason, message) = match rest {
                    Some(rest) => {
                        let (reason, message) = split_optional(&rest);
                        (Some(reason), message)
                    }
                    None => (None, None),
                };
                Operation::PropagateBuildStatus {
                    status: status.parse()?,
                    reason,
                    message,
                }
            }
            other => return Err(RevisionError::UnknownOperation(other.to_string())),
        };
        Ok(operation)
    }
}

fn split_optional(raw: &str) -> (String, Option<String>) {
    match raw.split_once(':') {
        Some((head, tail)) => (head.to_string(), Some(tail.to_string())),
        None => (raw.to_string(), None),
    }
}
