//! Activity ordering.
//!
//! Two passes:
//! - a topological pass (Kahn's algorithm) that drops activities whose
//!   dependencies never resolve
//! - a stable priority re-sort: mandatory first, then descending value density

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::graph::DependencyGraph;
use crate::models::{Activity, ExclusionReason, UnscheduledActivity};
use crate::{log_checks, log_debug};

/// Priority of an activity, computed once per activity.
///
/// Greater keys are scheduled first. Activities without a positive duration
/// have no density and rank last within their mandatory bucket.
#[derive(Debug, Clone, Copy)]
pub struct PriorityKey {
    pub mandatory: bool,
    pub density: f64,
}

impl PriorityKey {
    pub fn of(activity: &Activity) -> Self {
        let density = activity
            .value_density()
            .filter(|d| !d.is_nan())
            .unwrap_or(f64::NEG_INFINITY);
        Self {
            mandatory: activity.mandatory,
            density,
        }
    }
}

impl PartialEq for PriorityKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityKey {}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.mandatory
            .cmp(&other.mandatory)
            .then(self.density.total_cmp(&other.density))
    }
}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Output of the topological pass.
#[derive(Debug, Clone, Default)]
pub struct TopologicalOrder<'a> {
    /// Activities with every dependency before them.
    pub ordered: Vec<&'a Activity>,
    /// Activities that never became ready, in activity-set order.
    pub excluded: Vec<UnscheduledActivity>,
}

/// Order `activities` so that each one follows its dependencies.
///
/// The ready queue is FIFO and seeded in activity-set order. Activities in a
/// cycle, downstream of one, or depending on an undefined name are left out.
pub fn topological_sort<'a>(
    activities: &'a [Activity],
    graph: &DependencyGraph,
    verbosity: u8,
) -> TopologicalOrder<'a> {
    let mut in_degree = graph.in_degrees();
    let mut emitted = vec![false; in_degree.len()];
    let mut queue: VecDeque<u32> = VecDeque::with_capacity(activities.len());

    for (index, activity) in activities.iter().enumerate() {
        let Some(id) = graph.id(&activity.name) else {
            continue;
        };
        if graph.definition_of(id) == Some(index) && in_degree[id as usize] == 0 {
            queue.push_back(id);
        }
    }

    let mut ordered: Vec<&Activity> = Vec::with_capacity(activities.len());

    while let Some(id) = queue.pop_front() {
        let Some(index) = graph.definition_of(id) else {
            continue;
        };
        emitted[id as usize] = true;
        ordered.push(&activities[index]);

        for &dependent in graph.dependents_of(id) {
            let degree = &mut in_degree[dependent as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(dependent);
            }
        }
    }

    log_debug!(
        verbosity,
        "Topological order: {:?}",
        ordered.iter().map(|a| a.name.as_str()).collect::<Vec<_>>()
    );

    let mut excluded = Vec::new();
    for (index, activity) in activities.iter().enumerate() {
        let Some(id) = graph.id(&activity.name) else {
            continue;
        };
        let reason = if graph.definition_of(id) != Some(index) {
            ExclusionReason::ShadowedName
        } else if emitted[id as usize] {
            continue;
        } else if activity.dependencies.iter().any(|d| !graph.is_defined(d)) {
            ExclusionReason::UnresolvedDependency
        } else {
            ExclusionReason::BlockedDependency
        };
        log_checks!(verbosity, "  Excluded {:?}: {}", activity.name, reason);
        excluded.push(UnscheduledActivity::new(activity.name.clone(), reason));
    }

    TopologicalOrder { ordered, excluded }
}

/// Stable re-sort by priority: mandatory activities first, then by
/// descending value density. Ties keep their topological order.
///
/// This can place a dependent ahead of its dependency.
pub fn priority_sort<'a>(ordered: &[&'a Activity]) -> Vec<&'a Activity> {
    let mut keyed: Vec<(PriorityKey, &Activity)> =
        ordered.iter().map(|&a| (PriorityKey::of(a), a)).collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.into_iter().map(|(_, a)| a).collect()
}

/// Build the graph, run the topological pass, then the priority re-sort.
pub fn sort_activities<'a>(activities: &'a [Activity], verbosity: u8) -> TopologicalOrder<'a> {
    let graph = DependencyGraph::build(activities, verbosity);
    let mut order = topological_sort(activities, &graph, verbosity);
    order.ordered = priority_sort(&order.ordered);

    log_debug!(
        verbosity,
        "Priority order: {:?}",
        order
            .ordered
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
    );

    order
}
