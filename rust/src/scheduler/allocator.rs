//! Greedy budget allocation.

use crate::config::SchedulingConfig;
use crate::models::{Activity, ExclusionReason, UnscheduledActivity};
use crate::{log_changes, log_checks};

use super::queue::ActivityQueue;

/// Outcome of filling the budget.
#[derive(Debug, Clone, Default)]
pub struct Allocation {
    /// Selected activities in pop order; a partial activity can only be last.
    pub selected: Vec<Activity>,
    /// Popped or still-queued activities that were not selected.
    pub skipped: Vec<UnscheduledActivity>,
    /// Time consumed, including any partial activity.
    pub used_time: f64,
    /// Name of the activity that was cut to fit, if allocation ended with a partial.
    pub partial_of: Option<String>,
}

/// Pop activities in priority order and select those that fit.
///
/// An activity that fits the remaining time is taken whole. The first fractionable
/// one that does not fit is cut to the remaining time and ends allocation. Others
/// that do not fit are skipped. Stops once the budget is used up.
pub fn allocate(
    mut queue: ActivityQueue<'_>,
    available_time: f64,
    config: &SchedulingConfig,
) -> Allocation {
    let verbosity = config.verbosity;
    let mut selected: Vec<Activity> = Vec::with_capacity(queue.len());
    let mut skipped: Vec<UnscheduledActivity> = Vec::new();
    let mut current_time = 0.0;
    let mut partial_of = None;

    while current_time < available_time {
        let Some(activity) = queue.pop() else {
            break;
        };

        log_checks!(
            verbosity,
            "  Considering {:?} (duration={}, value={}, mandatory={}) at t={}",
            activity.name,
            activity.duration,
            activity.value,
            activity.mandatory,
            current_time
        );

        if current_time + activity.duration <= available_time {
            current_time += activity.duration;
            log_changes!(
                verbosity,
                "  Selected {:?} ({}/{} used)",
                activity.name,
                current_time,
                available_time
            );
            selected.push(activity.clone());
        } else if activity.fractionable {
            let remaining = available_time - current_time;
            let partial = activity.partial(remaining, &config.partial_suffix);
            log_changes!(
                verbosity,
                "  Selected {:?} for {} of {} (value {})",
                partial.name,
                remaining,
                activity.duration,
                partial.value
            );
            current_time = available_time;
            partial_of = Some(activity.name.clone());
            selected.push(partial);
            break;
        } else {
            log_checks!(
                verbosity,
                "  Skipped {:?}: needs {}, {} left",
                activity.name,
                activity.duration,
                available_time - current_time
            );
            skipped.push(UnscheduledActivity::new(
                activity.name.clone(),
                ExclusionReason::DoesNotFit,
            ));
        }
    }

    if !queue.is_empty() {
        log_changes!(
            verbosity,
            "Budget exhausted with {} activities queued",
            queue.len()
        );
    }
    skipped.extend(queue.drain().into_iter().map(|activity| {
        UnscheduledActivity::new(activity.name.clone(), ExclusionReason::BudgetExhausted)
    }));

    Allocation {
        selected,
        skipped,
        used_time: current_time,
        partial_of,
    }
}
