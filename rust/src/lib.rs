//! Timeboxed activity selection.
//!
//! Given a set of activities with values, durations and dependencies, picks
//! what to do within an available-time budget: dependency filtering, priority
//! ordering, then greedy allocation with an optional partial last activity.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

pub mod catalog;
mod config;
pub mod graph;
pub mod logging;
mod models;
pub mod scheduler;
pub mod sorting;

pub use catalog::{ActivityCatalog, Scenario};
pub use config::{SchedulingConfig, DEFAULT_PARTIAL_SUFFIX};
pub use graph::DependencyGraph;
pub use models::{Activity, ExclusionReason, ScheduleResult, UnscheduledActivity};
pub use scheduler::{schedule, ActivityQueue, Allocation, Scheduler, SchedulerError};
pub use sorting::{
    priority_sort, sort_activities, topological_sort, PriorityKey, TopologicalOrder,
};

fn to_py_err(err: SchedulerError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Select activities to fill `available_time`.
///
/// # Arguments
/// * `activities` - Candidate activities
/// * `available_time` - Time budget; zero or negative selects nothing
/// * `config` - Scheduling configuration (defaults when omitted)
///
/// # Raises
/// * ValueError if `available_time` is NaN or infinite
#[pyfunction]
#[pyo3(name = "schedule", signature = (activities, available_time, config=None))]
fn py_schedule(
    activities: Vec<Activity>,
    available_time: f64,
    config: Option<SchedulingConfig>,
) -> PyResult<ScheduleResult> {
    if !available_time.is_finite() {
        return Err(to_py_err(SchedulerError::InvalidBudget(available_time)));
    }
    let config = config.unwrap_or_default();
    Ok(schedule(&activities, available_time, &config))
}

/// Scheduler over a read-only catalog of activity sets (PyO3 wrapper).
#[pyclass(name = "Scheduler")]
pub struct PyScheduler {
    inner: Scheduler,
}

#[pymethods]
impl PyScheduler {
    /// Build from a JSON catalog, or from the bundled sample sets when omitted.
    #[new]
    #[pyo3(signature = (catalog_json=None, config=None))]
    fn new(catalog_json: Option<String>, config: Option<SchedulingConfig>) -> PyResult<Self> {
        let catalog = match catalog_json {
            Some(json) => ActivityCatalog::from_json(&json).map_err(to_py_err)?,
            None => ActivityCatalog::sample(),
        };
        Ok(Self {
            inner: Scheduler::new(catalog, config.unwrap_or_default()),
        })
    }

    fn scenario_keys(&self) -> Vec<String> {
        self.inner
            .catalog()
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Schedule the scenario stored under `key`.
    fn schedule(&self, key: String, available_time: f64) -> PyResult<ScheduleResult> {
        self.inner.schedule(&key, available_time).map_err(to_py_err)
    }

    /// Schedule the scenario at position `index` in the catalog.
    fn schedule_index(&self, index: usize, available_time: f64) -> PyResult<ScheduleResult> {
        self.inner
            .schedule_index(index, available_time)
            .map_err(to_py_err)
    }

    fn __len__(&self) -> usize {
        self.inner.catalog().len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Scheduler(scenarios={}, config={:?})",
            self.inner.catalog().len(),
            self.inner.config()
        )
    }
}

/// The timebox.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Activity>()?;
    m.add_class::<ScheduleResult>()?;
    m.add_class::<UnscheduledActivity>()?;

    // Config types
    m.add_class::<SchedulingConfig>()?;

    // Scheduling
    m.add_class::<PyScheduler>()?;
    m.add_function(wrap_pyfunction!(py_schedule, m)?)?;

    Ok(())
}
