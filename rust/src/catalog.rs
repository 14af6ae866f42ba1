//! Read-only catalog of named activity sets.
//!
//! A catalog is built once (from JSON or the bundled samples) and handed to a
//! [`Scheduler`](crate::Scheduler); it is never mutated afterwards.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::models::Activity;
use crate::scheduler::SchedulerError;

/// One named activity set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub key: String,
    pub activities: Vec<Activity>,
}

#[derive(Deserialize)]
struct CatalogFile {
    scenarios: Vec<Scenario>,
}

/// Scenarios in insertion order, addressable by key or position.
#[derive(Clone, Debug, Default)]
pub struct ActivityCatalog {
    scenarios: Vec<Scenario>,
}

impl ActivityCatalog {
    /// Build a catalog, rejecting duplicate keys.
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self, SchedulerError> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for scenario in &scenarios {
            if !seen.insert(scenario.key.as_str()) {
                return Err(SchedulerError::InvalidCatalog(format!(
                    "duplicate scenario key: {}",
                    scenario.key
                )));
            }
        }
        Ok(Self { scenarios })
    }

    /// Parse `{"scenarios": [{"key": ..., "activities": [...]}, ...]}`.
    pub fn from_json(json: &str) -> Result<Self, SchedulerError> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| SchedulerError::InvalidCatalog(e.to_string()))?;
        Self::new(file.scenarios)
    }

    pub fn get(&self, key: &str) -> Option<&[Activity]> {
        self.scenarios
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.activities.as_slice())
    }

    pub fn get_index(&self, index: usize) -> Option<&[Activity]> {
        self.scenarios.get(index).map(|s| s.activities.as_slice())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Eleven participant sets, keyed `participant-0` to `participant-10`.
    pub fn sample() -> Self {
        let scenarios = sample_sets()
            .into_iter()
            .enumerate()
            .map(|(i, activities)| Scenario {
                key: format!("participant-{}", i),
                activities,
            })
            .collect();
        Self { scenarios }
    }
}

const CLASS: &str = "2024 Fall class";
const LEETCODE: &str = "Leetcode";
const EXAMS: &str = "Assignments and Exams";
const NETWORKING: &str = "Networking event";
const JOBS: &str = "Job Searching and Preparation";
const SHOPPING: &str = "Shopping and Household";
const EXERCISE: &str = "Exercise and Outdoor Activity";

fn act(
    name: &str,
    value: f64,
    duration: f64,
    deps: &[&str],
    mandatory: bool,
    fractionable: bool,
) -> Activity {
    Activity {
        name: name.to_string(),
        value,
        duration,
        dependencies: deps.iter().map(|d| d.to_string()).collect(),
        mandatory,
        fractionable,
    }
}

#[rustfmt::skip]
fn sample_sets() -> Vec<Vec<Activity>> {
    vec![
        vec![
            act(CLASS, 10.0, 24.0, &[LEETCODE], true, false),
            act(LEETCODE, 6.0, 6.0, &[], false, true),
            act(EXAMS, 10.0, 80.0, &[CLASS], true, false),
            act(NETWORKING, 7.0, 9.0, &[], false, false),
            act(JOBS, 10.0, 30.0, &[LEETCODE], true, false),
            act(SHOPPING, 10.0, 5.0, &[], false, false),
            act(EXERCISE, 10.0, 20.0, &[], false, false),
        ],
        vec![
            act(LEETCODE, 6.0, 48.0, &[], false, true),
            act(CLASS, 7.0, 24.0, &[], false, false),
            act(EXAMS, 7.0, 80.0, &[CLASS], true, false),
            act(JOBS, 5.0, 20.0, &[], false, true),
            act(EXERCISE, 5.0, 20.0, &[], false, true),
            act(SHOPPING, 5.0, 20.0, &[], false, false),
            act(NETWORKING, 6.0, 10.0, &[], false, false),
        ],
        vec![
            act(LEETCODE, 10.0, 11.0, &[], false, true),
            act(CLASS, 10.0, 24.0, &[], false, false),
            act(EXAMS, 10.0, 90.0, &[CLASS], true, false),
            act(NETWORKING, 10.0, 7.0, &[], false, true),
            act(JOBS, 10.0, 30.0, &[], false, true),
            act(EXERCISE, 10.0, 30.0, &[], false, false),
            act(SHOPPING, 5.0, 15.0, &[], false, false),
        ],
        vec![
            act(SHOPPING, 4.0, 12.0, &[], false, false),
            act(EXAMS, 5.0, 30.0, &[CLASS], false, false),
            act(CLASS, 5.0, 24.0, &[], false, false),
            act(LEETCODE, 3.0, 20.0, &[], false, true),
            act(NETWORKING, 3.0, 5.0, &[], false, false),
            act(EXERCISE, 4.0, 50.0, &[], false, false),
            act(JOBS, 5.0, 20.0, &[], false, false),
        ],
        vec![
            act(LEETCODE, 6.0, 60.0, &[], false, true),
            act(CLASS, 6.0, 20.0, &[], false, false),
            act(NETWORKING, 5.0, 20.0, &[], false, false),
            act(JOBS, 7.0, 50.0, &[], false, true),
            act(SHOPPING, 7.0, 40.0, &[], false, true),
            act(EXAMS, 8.0, 60.0, &[], false, false),
            act(EXERCISE, 5.0, 15.0, &[], false, false),
        ],
        vec![
            act(CLASS, 8.0, 24.0, &[], false, false),
            act(LEETCODE, 10.0, 10.0, &[CLASS], true, false),
            act(EXAMS, 10.0, 80.0, &[CLASS], true, false),
            act(NETWORKING, 9.0, 30.0, &[], false, false),
            act(JOBS, 10.0, 40.0, &[], false, false),
            act(EXERCISE, 10.0, 30.0, &[], false, false),
            act(SHOPPING, 7.0, 8.0, &[], false, false),
        ],
        vec![
            act(CLASS, 7.0, 24.0, &[EXAMS], true, false),
            act(LEETCODE, 7.0, 9.0, &[], false, false),
            act(EXAMS, 6.0, 40.0, &[], false, false),
            act(NETWORKING, 8.0, 8.0, &[], false, false),
            act(EXERCISE, 7.0, 15.0, &[], false, true),
            act(JOBS, 7.0, 70.0, &[], false, false),
            act(SHOPPING, 5.0, 10.0, &[], false, false),
        ],
        vec![
            act(LEETCODE, 10.0, 90.0, &[], false, true),
            act(JOBS, 10.0, 45.0, &[LEETCODE], true, false),
            act(NETWORKING, 8.0, 7.0, &[], false, false),
            act(SHOPPING, 2.0, 7.0, &[], false, false),
            act(CLASS, 9.0, 45.0, &[], false, false),
            act(EXERCISE, 8.0, 7.0, &[], false, false),
            act(EXAMS, 7.0, 30.0, &[], false, false),
        ],
        vec![
            act(LEETCODE, 10.0, 90.0, &[], false, true),
            act(NETWORKING, 10.0, 34.0, &[JOBS], true, false),
            act(EXERCISE, 10.0, 10.0, &[SHOPPING], true, false),
            act(EXAMS, 10.0, 60.0, &[CLASS], true, false),
            act(CLASS, 10.0, 25.0, &[EXERCISE], true, true),
            act(SHOPPING, 10.0, 30.0, &[], false, false),
            act(JOBS, 8.0, 30.0, &[], false, false),
        ],
        vec![
            act(CLASS, 10.0, 24.0, &[], false, false),
            act(LEETCODE, 10.0, 40.0, &[], false, true),
            act(EXAMS, 10.0, 80.0, &[CLASS], true, true),
            act(EXERCISE, 7.0, 30.0, &[], false, true),
            act(NETWORKING, 6.0, 15.0, &[], false, false),
            act(JOBS, 8.0, 45.0, &[], false, true),
            act(SHOPPING, 10.0, 24.0, &[], false, false),
        ],
        vec![
            act("Assignments", 7.0, 90.0, &[CLASS], true, true),
            act(LEETCODE, 6.0, 10.0, &[], false, true),
            act(SHOPPING, 8.0, 12.0, &[], false, true),
            act(CLASS, 4.0, 30.0, &[], false, true),
            act(EXERCISE, 7.0, 15.0, &[], false, true),
            act(NETWORKING, 3.0, 40.0, &[], false, true),
            act(LEETCODE, 7.0, 17.0, &[], false, true),
        ],
    ]
}
