//! Admission filter and max-priority queue.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::log_checks;
use crate::models::{Activity, ExclusionReason, UnscheduledActivity};
use crate::sorting::PriorityKey;

/// Heap entry. `seq` is the position in the prioritized order; earlier pops first on equal keys.
#[derive(Debug)]
struct QueueEntry<'a> {
    key: PriorityKey,
    seq: usize,
    activity: &'a Activity,
}

impl PartialEq for QueueEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry<'_> {}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Candidates for allocation, popped mandatory first, then by descending value density.
#[derive(Debug, Default)]
pub struct ActivityQueue<'a> {
    heap: BinaryHeap<QueueEntry<'a>>,
}

impl<'a> ActivityQueue<'a> {
    /// Admit activities from `ordered` that can take part in allocation.
    ///
    /// An activity needs a positive duration, and an optional one must also fit in
    /// the whole budget. Mandatory activities are admitted regardless of length.
    /// Returns the queue and the rejected activities in `ordered` order.
    pub fn build(
        ordered: &[&'a Activity],
        available_time: f64,
        verbosity: u8,
    ) -> (Self, Vec<UnscheduledActivity>) {
        let mut heap = BinaryHeap::with_capacity(ordered.len());
        let mut rejected = Vec::new();

        for (seq, &activity) in ordered.iter().enumerate() {
            let reason = if !activity.has_positive_duration() {
                Some(ExclusionReason::NonPositiveDuration)
            } else if !activity.mandatory && available_time < activity.duration {
                Some(ExclusionReason::ExceedsBudget)
            } else {
                None
            };

            match reason {
                Some(reason) => {
                    log_checks!(
                        verbosity,
                        "  Not admitted {:?} (duration={}): {}",
                        activity.name,
                        activity.duration,
                        reason
                    );
                    rejected.push(UnscheduledActivity::new(activity.name.clone(), reason));
                }
                None => heap.push(QueueEntry {
                    key: PriorityKey::of(activity),
                    seq,
                    activity,
                }),
            }
        }

        (Self { heap }, rejected)
    }

    /// Remove the highest-priority activity.
    pub fn pop(&mut self) -> Option<&'a Activity> {
        self.heap.pop().map(|entry| entry.activity)
    }

    /// Remaining activities in pop order.
    pub fn drain(self) -> Vec<&'a Activity> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .rev()
            .map(|entry| entry.activity)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
