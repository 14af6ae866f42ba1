//! Scheduling pipeline and the catalog-backed scheduler.

use thiserror::Error;

use crate::catalog::ActivityCatalog;
use crate::config::SchedulingConfig;
use crate::models::{Activity, ScheduleResult};
use crate::sorting::sort_activities;
use crate::{log_changes, log_debug};

use super::allocator::allocate;
use super::queue::ActivityQueue;

/// Errors raised while resolving a scheduling request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
    #[error("Scenario index {index} out of range (catalog has {len})")]
    ScenarioIndexOutOfRange { index: usize, len: usize },
    #[error("Invalid available time: {0}")]
    InvalidBudget(f64),
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Select activities from `activities` to fill `available_time`.
///
/// Runs the dependency graph, topological pass, priority re-sort, admission
/// filter and greedy allocation. Never fails: activities that cannot take part
/// are reported in `unscheduled`. A budget of zero or below selects nothing.
pub fn schedule(
    activities: &[Activity],
    available_time: f64,
    config: &SchedulingConfig,
) -> ScheduleResult {
    let verbosity = config.verbosity;
    log_debug!(
        verbosity,
        "Scheduling {} activities into {}",
        activities.len(),
        available_time
    );

    let order = sort_activities(activities, verbosity);
    let (queue, rejected) = ActivityQueue::build(&order.ordered, available_time, verbosity);
    let allocation = allocate(queue, available_time, config);

    let unscheduled = if config.report_unscheduled {
        let mut unscheduled = order.excluded;
        unscheduled.extend(rejected);
        unscheduled.extend(allocation.skipped);
        unscheduled
    } else {
        Vec::new()
    };

    let mut result = ScheduleResult::from_selection(allocation.selected, unscheduled);
    result.partial_of = allocation.partial_of;
    log_changes!(
        verbosity,
        "Selected {} activities, time {}/{}, value {}",
        result.selected.len(),
        result.used_time,
        available_time,
        result.total_value
    );
    result
}

/// Schedules activity sets looked up in a read-only catalog.
#[derive(Debug, Clone)]
pub struct Scheduler {
    catalog: ActivityCatalog,
    config: SchedulingConfig,
}

impl Scheduler {
    pub fn new(catalog: ActivityCatalog, config: SchedulingConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &ActivityCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    /// Schedule the scenario stored under `key`.
    pub fn schedule(
        &self,
        key: &str,
        available_time: f64,
    ) -> Result<ScheduleResult, SchedulerError> {
        let available_time = validate_budget(available_time)?;
        let activities = self
            .catalog
            .get(key)
            .ok_or_else(|| SchedulerError::UnknownScenario(key.to_string()))?;
        Ok(schedule(activities, available_time, &self.config))
    }

    /// Schedule the scenario at `index` in catalog order.
    pub fn schedule_index(
        &self,
        index: usize,
        available_time: f64,
    ) -> Result<ScheduleResult, SchedulerError> {
        let available_time = validate_budget(available_time)?;
        let activities = self
            .catalog
            .get_index(index)
            .ok_or(SchedulerError::ScenarioIndexOutOfRange {
                index,
                len: self.catalog.len(),
            })?;
        Ok(schedule(activities, available_time, &self.config))
    }
}

/// Reject NaN and infinite budgets. Negative budgets are valid and select nothing.
fn validate_budget(available_time: f64) -> Result<f64, SchedulerError> {
    if available_time.is_finite() {
        Ok(available_time)
    } else {
        Err(SchedulerError::InvalidBudget(available_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Scenario;
    use crate::models::{ExclusionReason, UnscheduledActivity};

    fn make_activity(
        name: &str,
        value: f64,
        duration: f64,
        deps: &[&str],
        mandatory: bool,
        fractionable: bool,
    ) -> Activity {
        Activity::new(
            name.to_string(),
            value,
            duration,
            Some(deps.iter().map(|d| d.to_string()).collect()),
            mandatory,
            fractionable,
        )
    }

    fn run(activities: &[Activity], available_time: f64) -> ScheduleResult {
        schedule(activities, available_time, &SchedulingConfig::default())
    }

    #[test]
    fn test_mandatory_then_partial_scenario() {
        let activities = vec![
            make_activity("A", 10.0, 5.0, &[], true, false),
            make_activity("B", 6.0, 6.0, &[], false, true),
        ];
        let result = run(&activities, 8.0);

        assert_eq!(result.selected_names(), vec!["A", "B (Partial)"]);
        assert_eq!(result.selected[0], activities[0]);
        assert_eq!(result.selected[1].value, 3.0);
        assert_eq!(result.selected[1].duration, 3.0);
        assert_eq!(result.used_time, 8.0);
        assert_eq!(result.total_value, 13.0);
        assert_eq!(result.partial_of.as_deref(), Some("B"));
        assert!(result.unscheduled.is_empty());
    }

    #[test]
    fn test_cycle_selects_nothing() {
        let activities = vec![
            make_activity("A", 10.0, 1.0, &["B"], true, true),
            make_activity("B", 10.0, 1.0, &["A"], false, true),
        ];
        for budget in [0.0, 1.0, 5.0, 1000.0] {
            let result = run(&activities, budget);
            assert!(result.selected.is_empty());
            assert_eq!(result.unscheduled.len(), 2);
            assert!(result
                .unscheduled
                .iter()
                .all(|u| u.reason == ExclusionReason::BlockedDependency));
        }
    }

    #[test]
    fn test_zero_budget_selects_nothing() {
        let activities = vec![
            make_activity("m", 5.0, 1.0, &[], true, true),
            make_activity("zero", 5.0, 0.0, &[], false, false),
            make_activity("o", 5.0, 1.0, &[], false, true),
        ];
        let result = run(&activities, 0.0);

        assert!(result.selected.is_empty());
        assert_eq!(result.used_time, 0.0);
    }

    #[test]
    fn test_negative_budget_selects_nothing() {
        let activities = vec![make_activity("m", 5.0, 1.0, &[], true, true)];
        assert!(run(&activities, -3.0).selected.is_empty());
    }

    #[test]
    fn test_unscheduled_reports_each_stage() {
        let activities = vec![
            make_activity("needs_ghost", 5.0, 1.0, &["ghost"], false, false),
            make_activity("zero", 5.0, 0.0, &[], false, false),
            make_activity("too_long", 5.0, 50.0, &[], false, false),
            make_activity("first", 9.0, 3.0, &[], true, false),
            make_activity("quick", 8.0, 2.0, &[], false, false),
            make_activity("bulky", 7.0, 2.5, &[], false, false),
            make_activity("cut", 4.0, 4.0, &[], false, true),
            make_activity("left", 0.5, 1.0, &[], false, false),
        ];
        let result = run(&activities, 6.0);

        assert_eq!(
            result.selected_names(),
            vec!["first", "quick", "cut (Partial)"]
        );
        assert_eq!(
            result.unscheduled,
            vec![
                UnscheduledActivity::new("needs_ghost", ExclusionReason::UnresolvedDependency),
                UnscheduledActivity::new("too_long", ExclusionReason::ExceedsBudget),
                UnscheduledActivity::new("zero", ExclusionReason::NonPositiveDuration),
                UnscheduledActivity::new("bulky", ExclusionReason::DoesNotFit),
                UnscheduledActivity::new("left", ExclusionReason::BudgetExhausted),
            ]
        );
    }

    #[test]
    fn test_report_unscheduled_can_be_disabled() {
        let activities = vec![make_activity("too_long", 5.0, 50.0, &[], false, false)];
        let config = SchedulingConfig {
            report_unscheduled: false,
            ..SchedulingConfig::default()
        };
        let result = schedule(&activities, 6.0, &config);

        assert!(result.selected.is_empty());
        assert!(result.unscheduled.is_empty());
    }

    #[test]
    fn test_custom_partial_suffix() {
        let activities = vec![make_activity("Leetcode", 6.0, 6.0, &[], false, true)];
        let config = SchedulingConfig {
            partial_suffix: " [part]".to_string(),
            ..SchedulingConfig::default()
        };
        let mut result = schedule(&activities, 8.0, &config);
        assert_eq!(result.selected_names(), vec!["Leetcode"]);
        assert_eq!(result.partial_of, None);

        result = schedule(
            &[make_activity("Leetcode", 6.0, 12.0, &[], true, true)],
            8.0,
            &config,
        );
        assert_eq!(result.selected_names(), vec!["Leetcode [part]"]);
        assert_eq!(result.partial_of.as_deref(), Some("Leetcode"));
    }

    #[test]
    fn test_duplicate_dependency_is_selected() {
        let activities = vec![
            make_activity("b", 4.0, 2.0, &["a", "a"], false, false),
            make_activity("a", 1.0, 1.0, &[], false, false),
        ];
        let result = run(&activities, 5.0);

        assert_eq!(result.selected_names(), vec!["b", "a"]);
        assert_eq!(result.used_time, 3.0);
        assert!(result.unscheduled.is_empty());
    }

    #[test]
    fn test_dependent_may_precede_dependency_after_resort() {
        // Both become ready, then priority puts the dependent first.
        let activities = vec![
            make_activity("Leetcode", 6.0, 6.0, &[], false, true),
            make_activity("Job search", 10.0, 30.0, &["Leetcode"], true, false),
        ];
        let result = run(&activities, 40.0);

        assert_eq!(result.selected_names(), vec!["Job search", "Leetcode"]);
    }

    #[test]
    fn test_deterministic() {
        let activities = vec![
            make_activity("a", 3.0, 3.0, &[], false, true),
            make_activity("b", 3.0, 3.0, &[], false, false),
            make_activity("c", 6.0, 3.0, &["a"], true, false),
            make_activity("d", 1.0, 2.0, &["b", "c"], false, true),
        ];
        let first = run(&activities, 7.5);
        for _ in 0..10 {
            assert_eq!(run(&activities, 7.5), first);
        }
    }

    #[test]
    fn test_scheduler_resolves_scenarios() {
        let catalog = ActivityCatalog::new(vec![Scenario {
            key: "weekend".to_string(),
            activities: vec![
                make_activity("A", 10.0, 5.0, &[], true, false),
                make_activity("B", 6.0, 6.0, &[], false, true),
            ],
        }])
        .unwrap();
        let scheduler = Scheduler::new(catalog, SchedulingConfig::default());

        let by_key = scheduler.schedule("weekend", 8.0).unwrap();
        let by_index = scheduler.schedule_index(0, 8.0).unwrap();
        assert_eq!(by_key, by_index);
        assert_eq!(by_key.selected_names(), vec!["A", "B (Partial)"]);

        assert_eq!(
            scheduler.schedule("weekday", 8.0),
            Err(SchedulerError::UnknownScenario("weekday".to_string()))
        );
        assert_eq!(
            scheduler.schedule_index(3, 8.0),
            Err(SchedulerError::ScenarioIndexOutOfRange { index: 3, len: 1 })
        );
        assert!(matches!(
            scheduler.schedule("weekend", f64::NAN),
            Err(SchedulerError::InvalidBudget(_))
        ));
        assert!(matches!(
            scheduler.schedule_index(0, f64::INFINITY),
            Err(SchedulerError::InvalidBudget(_))
        ));
    }
}
