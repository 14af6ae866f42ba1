//! Configuration types for the scheduling engine.

use pyo3::prelude::*;

/// Suffix appended to the name of a partially selected activity.
pub const DEFAULT_PARTIAL_SUFFIX: &str = " (Partial)";

/// Configuration for one scheduling invocation.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SchedulingConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Appended to the name of a partial activity
    #[pyo3(get, set)]
    pub partial_suffix: String,
    /// Collect the list of activities that were not selected
    #[pyo3(get, set)]
    pub report_unscheduled: bool,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            partial_suffix: DEFAULT_PARTIAL_SUFFIX.to_string(),
            report_unscheduled: true,
        }
    }
}

#[pymethods]
impl SchedulingConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, partial_suffix=None, report_unscheduled=None))]
    fn new(
        verbosity: Option<u8>,
        partial_suffix: Option<String>,
        report_unscheduled: Option<bool>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            partial_suffix: partial_suffix.unwrap_or(defaults.partial_suffix),
            report_unscheduled: report_unscheduled.unwrap_or(defaults.report_unscheduled),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulingConfig(verbosity={}, partial_suffix={:?}, report_unscheduled={})",
            self.verbosity, self.partial_suffix, self.report_unscheduled
        )
    }
}
