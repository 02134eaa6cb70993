//! # Condition Set
//!
//! Declares the condition vocabulary of one resource kind: the happy
//! (aggregate) condition, the dependents folded into it in priority order, and
//! the independent conditions that are seeded but never aggregated.

use super::manager::ConditionManager;
use crate::crd::Condition;

/// How a dependent condition participates in the aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Always part of the aggregate; absence counts as `Unknown`
    Required,
    /// Part of the aggregate only once present in the condition list
    WhenTracked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependent {
    pub condition_type: String,
    pub membership: Membership,
}

/// Condition vocabulary for one resource kind
///
/// ```
/// use revision_condition_manager::conditions::ConditionSet;
///
/// let set = ConditionSet::new("Ready")
///     .with_optional_dependent("BuildSucceeded")
///     .with_dependent("ResourcesAvailable")
///     .with_independent("Active");
/// assert!(set.is_dependent("BuildSucceeded"));
/// assert!(!set.is_dependent("Active"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionSet {
    happy: String,
    dependents: Vec<Dependent>,
    independents: Vec<String>,
}

impl ConditionSet {
    pub fn new(happy: impl Into<String>) -> Self {
        Self {
            happy: happy.into(),
            dependents: Vec::new(),
            independents: Vec::new(),
        }
    }

    /// Append a required dependent; declaration order is aggregation priority
    #[must_use]
    pub fn with_dependent(self, condition_type: impl Into<String>) -> Self {
        self.push_dependent(condition_type.into(), Membership::Required)
    }

    /// Append a dependent that only counts once it has been tracked
    #[must_use]
    pub fn with_optional_dependent(self, condition_type: impl Into<String>) -> Self {
        self.push_dependent(condition_type.into(), Membership::WhenTracked)
    }

    #[must_use]
    pub fn with_independent(mut self, condition_type: impl Into<String>) -> Self {
        self.independents.push(condition_type.into());
        self
    }

    fn push_dependent(mut self, condition_type: String, membership: Membership) -> Self {
        self.dependents.push(Dependent {
            condition_type,
            membership,
        });
        self
    }

    pub fn happy(&self) -> &str {
        &self.happy
    }

    /// Dependents in aggregation priority order
    pub fn dependents(&self) -> &[Dependent] {
        &self.dependents
    }

    pub fn independents(&self) -> &[String] {
        &self.independents
    }

    pub fn is_dependent(&self, condition_type: &str) -> bool {
        self.dependents
            .iter()
            .any(|d| d.condition_type == condition_type)
    }

    /// Whether the type belongs to this set's vocabulary
    pub fn is_known(&self, condition_type: &str) -> bool {
        condition_type == self.happy
            || self.is_dependent(condition_type)
            || self.independents.iter().any(|t| t == condition_type)
    }

    /// Take single-owner control of a condition list
    pub fn manage<'a>(&'a self, conditions: &'a mut Vec<Condition>) -> ConditionManager<'a> {
        ConditionManager::new(self, conditions)
    }
}
