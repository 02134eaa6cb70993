//! # Condition Manager
//!
//! Mutates a condition list on behalf of a [`ConditionSet`] and keeps the
//! happy condition consistent with the dependents after every mutation.

use super::set::{ConditionSet, Membership};
use crate::crd::{Condition, ConditionStatus};
use crate::observability::metrics::{self, OTHER_CONDITION_TYPE_LABEL};
use chrono::{DateTime, SubsecRound, Utc};
use tracing::debug;

/// Single-owner view over a condition list
///
/// Holding the list by `&mut` means no other observer can see it between the
/// dependent update and the happy-condition recomputation.
#[derive(Debug)]
pub struct ConditionManager<'a> {
    set: &'a ConditionSet,
    conditions: &'a mut Vec<Condition>,
}

impl<'a> ConditionManager<'a> {
    pub(super) fn new(set: &'a ConditionSet, conditions: &'a mut Vec<Condition>) -> Self {
        Self { set, conditions }
    }

    pub fn get(&self, condition_type: &str) -> Option<&Condition> {
        find(self.conditions.as_slice(), condition_type)
    }

    pub fn happy(&self) -> Option<&Condition> {
        self.get(self.set.happy())
    }

    pub fn is_happy(&self) -> bool {
        self.happy().is_some_and(Condition::is_true)
    }

    /// Record a condition
    ///
    /// An empty condition is ignored. If the status is unchanged only the
    /// reason and message are refreshed and `lastTransitionTime` is kept.
    /// Setting a dependent recomputes the happy condition.
    ///
    /// The happy condition is derived: setting it directly only triggers a
    /// recomputation from the dependents.
    pub fn set_condition(&mut self, condition: Condition, now: DateTime<Utc>) {
        if condition.is_empty() {
            return;
        }
        if condition.r#type == self.set.happy() {
            debug!(
                condition = %condition.r#type,
                requested = %condition.status,
                "happy condition is derived, recomputing from dependents"
            );
            self.recompute_happy(now);
            return;
        }
        let recompute = self.set.is_dependent(&condition.r#type);
        self.apply(condition, now);
        if recompute {
            self.recompute_happy(now);
        }
    }

    /// Seed every required dependent and independent condition as `Unknown`
    ///
    /// Existing conditions are left untouched.
    pub fn initialize(&mut self, now: DateTime<Utc>) {
        let set = self.set;
        let required = set
            .dependents()
            .iter()
            .filter(|d| d.membership == Membership::Required)
            .map(|d| d.condition_type.as_str());
        let independents = set.independents().iter().map(String::as_str);

        for condition_type in required.chain(independents) {
            self.seed(condition_type, now);
        }
        self.recompute_happy(now);
    }

    /// Start tracking a condition, seeding it as `Unknown` if absent
    pub fn track(&mut self, condition_type: &str, now: DateTime<Utc>) {
        self.seed(condition_type, now);
        self.recompute_happy(now);
    }

    pub fn mark_true(&mut self, condition_type: &str, now: DateTime<Utc>) {
        self.set_condition(Condition::new(condition_type, ConditionStatus::True), now);
    }

    pub fn mark_unknown(
        &mut self,
        condition_type: &str,
        reason: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.set_condition(
            with_details(condition_type, ConditionStatus::Unknown, reason, message),
            now,
        );
    }

    pub fn mark_false(
        &mut self,
        condition_type: &str,
        reason: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.set_condition(
            with_details(condition_type, ConditionStatus::False, reason, message),
            now,
        );
    }

    fn seed(&mut self, condition_type: &str, now: DateTime<Utc>) {
        if self.get(condition_type).is_none() {
            self.apply(Condition::new(condition_type, ConditionStatus::Unknown), now);
        }
    }

    fn recompute_happy(&mut self, now: DateTime<Utc>) {
        let happy = aggregate(self.set, self.conditions.as_slice());
        metrics::increment_ready_evaluations(happy.status.as_str());
        self.apply(happy, now);
    }

    fn apply(&mut self, mut condition: Condition, now: DateTime<Utc>) {
        // Whole seconds, matching the persisted form
        let now = now.trunc_subsecs(0);
        let metric_type = if self.set.is_known(&condition.r#type) {
            condition.r#type.clone()
        } else {
            OTHER_CONDITION_TYPE_LABEL.to_string()
        };
        let existing = self
            .conditions
            .iter()
            .position(|c| c.r#type == condition.r#type);

        match existing {
            Some(index) if self.conditions[index].status == condition.status => {
                let current = &mut self.conditions[index];
                current.reason = condition.reason;
                current.message = condition.message;
            }
            Some(index) => {
                debug!(
                    condition = %condition.r#type,
                    from = %self.conditions[index].status,
                    to = %condition.status,
                    reason = condition.reason.as_deref().unwrap_or(""),
                    "condition transitioned"
                );
                metrics::increment_condition_transitions(&metric_type, condition.status.as_str());
                condition.last_transition_time = Some(now);
                self.conditions[index] = condition;
            }
            None => {
                debug!(
                    condition = %condition.r#type,
                    to = %condition.status,
                    reason = condition.reason.as_deref().unwrap_or(""),
                    "condition added"
                );
                metrics::increment_condition_transitions(&metric_type, condition.status.as_str());
                condition.last_transition_time = Some(now);
                self.conditions.push(condition);
            }
        }

        // Stable order by type keeps external diffs minimal
        self.conditions.sort_by(|a, b| a.r#type.cmp(&b.r#type));
    }
}

fn find<'c>(conditions: &'c [Condition], condition_type: &str) -> Option<&'c Condition> {
    conditions.iter().find(|c| c.r#type == condition_type)
}

fn with_details(
    condition_type: &str,
    status: ConditionStatus,
    reason: impl Into<String>,
    message: impl Into<String>,
) -> Condition {
    Condition {
        r#type: condition_type.to_string(),
        status,
        reason: non_empty(reason.into()),
        message: non_empty(message.into()),
        last_transition_time: None,
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Worst-of-dependents merge
///
/// `False` beats `Unknown` (or a missing required dependent), which beats
/// `True`. Within a status the first dependent in declaration order supplies
/// the reason and message.
fn aggregate(set: &ConditionSet, conditions: &[Condition]) -> Condition {
    let mut first_unknown: Option<Condition> = None;

    for dependent in set.dependents() {
        match find(conditions, &dependent.condition_type) {
            Some(c) if c.is_false() => {
                return summary(set, ConditionStatus::False, Some(c));
            }
            Some(c) if c.is_unknown() => {
                first_unknown.get_or_insert_with(|| c.clone());
            }
            Some(_) => {}
            None if dependent.membership == Membership::Required => {
                first_unknown.get_or_insert_with(Condition::default);
            }
            None => {}
        }
    }

    match first_unknown {
        Some(c) => summary(set, ConditionStatus::Unknown, Some(&c)),
        None => summary(set, ConditionStatus::True, None),
    }
}

fn summary(set: &ConditionSet, status: ConditionStatus, source: Option<&Condition>) -> Condition {
    Condition {
        r#type: set.happy().to_string(),
        status,
        reason: source.and_then(|c| c.reason.clone()),
        message: source.and_then(|c| c.message.clone()),
        last_transition_time: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn test_set() -> ConditionSet {
        ConditionSet::new("Ready")
            .with_optional_dependent("Built")
            .with_dependent("Scheduled")
            .with_dependent("Healthy")
            .with_independent("Serving")
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_initialize_seeds_required_and_independent_only() {
        let set = test_set();
        let mut conditions = Vec::new();
        set.manage(&mut conditions).initialize(t0());

        let types: Vec<&str> = conditions.iter().map(|c| c.r#type.as_str()).collect();
        assert_eq!(types, vec!["Healthy", "Ready", "Scheduled", "Serving"]);
        assert!(conditions.iter().all(Condition::is_unknown));
        assert!(conditions.iter().all(|c| c.last_transition_time == Some(t0())));
    }

    #[test]
    fn test_set_condition_ignores_empty() {
        let set = test_set();
        let mut conditions = Vec::new();
        set.manage(&mut conditions)
            .set_condition(Condition::default(), t0());
        assert!(conditions.is_empty());
    }

    #[test]
    fn test_set_condition_non_dependent_does_not_create_happy() {
        let set = test_set();
        let mut conditions = Vec::new();
        let mut manager = set.manage(&mut conditions);
        manager.set_condition(Condition::new("Foo", ConditionStatus::True), t0());
        manager.set_condition(Condition::new("Bar", ConditionStatus::True), t0());
        assert!(manager.happy().is_none());
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0].r#type, "Bar");
    }

    #[test]
    fn test_same_status_keeps_transition_time_but_refreshes_reason() {
        let set = test_set();
        let mut conditions = Vec::new();
        let mut manager = set.manage(&mut conditions);
        manager.mark_unknown("Healthy", "Pulling", "pulling image", t0());
        manager.mark_unknown("Healthy", "Starting", "", t0() + Duration::seconds(30));

        let healthy = manager.get("Healthy").unwrap();
        assert_eq!(healthy.last_transition_time, Some(t0()));
        assert_eq!(healthy.reason.as_deref(), Some("Starting"));
        assert_eq!(healthy.message, None);
    }

    #[test]
    fn test_status_change_stamps_now() {
        let set = test_set();
        let mut conditions = Vec::new();
        let mut manager = set.manage(&mut conditions);
        manager.initialize(t0());
        let later = t0() + Duration::seconds(90);
        manager.mark_false("Healthy", "Crashing", "exit code 1", later);

        assert_eq!(manager.get("Healthy").unwrap().last_transition_time, Some(later));
        assert_eq!(manager.get("Scheduled").unwrap().last_transition_time, Some(t0()));
        assert_eq!(manager.happy().unwrap().last_transition_time, Some(later));
    }

    #[test]
    fn test_false_dominates_unknown_regardless_of_priority() {
        let set = test_set();
        let mut conditions = Vec::new();
        let mut manager = set.manage(&mut conditions);
        manager.initialize(t0());
        manager.track("Built", t0());
        manager.mark_true("Scheduled", t0());
        manager.mark_false("Healthy", "Crashing", "boom", t0());

        let happy = manager.happy().unwrap();
        assert!(happy.is_false());
        assert_eq!(happy.reason.as_deref(), Some("Crashing"));
    }

    #[test]
    fn test_first_unknown_in_priority_order_supplies_reason() {
        let set = test_set();
        let mut conditions = Vec::new();
        let mut manager = set.manage(&mut conditions);
        manager.mark_unknown("Healthy", "Probing", "", t0());
        manager.mark_unknown("Scheduled", "Queued", "", t0());

        let happy = manager.happy().unwrap();
        assert!(happy.is_unknown());
        assert_eq!(happy.reason.as_deref(), Some("Queued"));
    }

    #[test]
    fn test_untracked_optional_dependent_does_not_block() {
        let set = test_set();
        let mut conditions = Vec::new();
        let mut manager = set.manage(&mut conditions);
        manager.initialize(t0());
        manager.mark_true("Scheduled", t0());
        manager.mark_true("Healthy", t0());
        assert!(manager.is_happy());

        manager.track("Built", t0());
        assert!(!manager.is_happy());
        manager.mark_true("Built", t0());
        assert!(manager.is_happy());
        assert_eq!(manager.happy().unwrap().reason, None);
    }

    #[test]
    fn test_missing_required_dependent_counts_as_unknown() {
        let set = test_set();
        let mut conditions = Vec::new();
        let mut manager = set.manage(&mut conditions);
        manager.mark_true("Healthy", t0());

        let happy = manager.happy().unwrap();
        assert!(happy.is_unknown());
        assert_eq!(happy.reason, None);
    }

    #[test]
    fn test_setting_happy_directly_recomputes_it() {
        let set = test_set();
        let mut conditions = Vec::new();
        let mut manager = set.manage(&mut conditions);
        manager.initialize(t0());
        manager.mark_false("Healthy", "Crashing", "boom", t0());

        manager.set_condition(Condition::new("Ready", ConditionStatus::True), t0());
        let happy = manager.happy().unwrap();
        assert!(happy.is_false());
        assert_eq!(happy.reason.as_deref(), Some("Crashing"));
    }

    #[test]
    fn test_setting_happy_on_empty_list_derives_it() {
        let set = test_set();
        let mut conditions = Vec::new();
        set.manage(&mut conditions)
            .set_condition(Condition::new("Ready", ConditionStatus::True), t0());

        assert_eq!(conditions.len(), 1);
        assert!(conditions[0].is_unknown());
    }

    #[test]
    fn test_transition_time_is_truncated_to_seconds() {
        let set = test_set();
        let mut conditions = Vec::new();
        let mut manager = set.manage(&mut conditions);
        manager.mark_true("Healthy", t0() + Duration::milliseconds(750));

        assert_eq!(manager.get("Healthy").unwrap().last_transition_time, Some(t0()));
        assert_eq!(manager.happy().unwrap().last_transition_time, Some(t0()));
    }

    #[test]
    fn test_unknown_condition_types_share_one_metric_series() {
        let before = metrics::condition_transitions_total(OTHER_CONDITION_TYPE_LABEL, "True");
        let set = test_set();
        let mut conditions = Vec::new();
        set.manage(&mut conditions)
            .set_condition(Condition::new("Sparkles", ConditionStatus::True), t0());

        assert!(metrics::condition_transitions_total(OTHER_CONDITION_TYPE_LABEL, "True") > before);
        assert_eq!(metrics::condition_transitions_total("Sparkles", "True"), 0);
    }

    #[test]
    fn test_independent_does_not_affect_happy() {
        let set = test_set();
        let mut conditions = Vec::new();
        let mut manager = set.manage(&mut conditions);
        manager.initialize(t0());
        manager.mark_true("Scheduled", t0());
        manager.mark_true("Healthy", t0());
        manager.mark_false("Serving", "ScaledToZero", "", t0());
        assert!(manager.is_happy());
    }
}
