//! Core data types for the activity selection engine.

use pyo3::prelude::*;
use pyo3::types::PyDict;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate unit of work.
///
/// Activities are immutable inputs to the pipeline. The only new instances are
/// partial activities synthesized by the allocator.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub value: f64,
    #[pyo3(get, set)]
    pub duration: f64,
    #[pyo3(get, set)]
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub mandatory: bool,
    #[pyo3(get, set)]
    #[serde(default)]
    pub fractionable: bool,
}

#[pymethods]
impl Activity {
    #[new]
    #[pyo3(signature = (
        name,
        value,
        duration,
        dependencies=None,
        mandatory=false,
        fractionable=false
    ))]
    pub fn new(
        name: String,
        value: f64,
        duration: f64,
        dependencies: Option<Vec<String>>,
        mandatory: bool,
        fractionable: bool,
    ) -> Self {
        Self {
            name,
            value,
            duration,
            dependencies: dependencies.unwrap_or_default(),
            mandatory,
            fractionable,
        }
    }

    /// Dictionary form used by web front ends (one record per selected activity).
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        dict.set_item("name", &self.name)?;
        dict.set_item("value", self.value)?;
        dict.set_item("duration", self.duration)?;
        dict.set_item("dependencies", &self.dependencies)?;
        dict.set_item("mandatory", self.mandatory)?;
        dict.set_item("fractionable", self.fractionable)?;
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!(
            "Activity(name={:?}, value={}, duration={}, deps={}, mandatory={}, fractionable={})",
            self.name,
            self.value,
            self.duration,
            self.dependencies.len(),
            self.mandatory,
            self.fractionable
        )
    }
}

impl Activity {
    /// Whether the activity can ever be admitted to the priority queue.
    #[inline]
    pub fn has_positive_duration(&self) -> bool {
        self.duration > 0.0
    }

    /// Value per unit of duration, or `None` when the duration is zero or negative.
    pub fn value_density(&self) -> Option<f64> {
        if self.has_positive_duration() {
            Some(self.value / self.duration)
        } else {
            None
        }
    }

    /// Build the partial form of this activity covering `remaining_time`.
    ///
    /// The value is scaled by the fraction of the duration that fits. The result
    /// carries no dependencies and is neither mandatory nor fractionable.
    pub fn partial(&self, remaining_time: f64, suffix: &str) -> Activity {
        Activity {
            name: format!("{}{}", self.name, suffix),
            value: self.value * (remaining_time / self.duration),
            duration: remaining_time,
            dependencies: Vec::new(),
            mandatory: false,
            fractionable: false,
        }
    }
}

/// Why an activity of the input set did not end up in the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// A later activity with the same name replaced this one.
    ShadowedName,
    /// Depends on a name that no activity in the set carries.
    UnresolvedDependency,
    /// Waits on a cycle or on another excluded activity.
    BlockedDependency,
    /// Zero or negative duration.
    NonPositiveDuration,
    /// Optional activity longer than the whole budget.
    ExceedsBudget,
    /// Did not fit the remaining budget and is not fractionable.
    DoesNotFit,
    /// Still queued when the budget ran out or a partial ended allocation.
    BudgetExhausted,
}

impl ExclusionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShadowedName => "shadowed_name",
            Self::UnresolvedDependency => "unresolved_dependency",
            Self::BlockedDependency => "blocked_dependency",
            Self::NonPositiveDuration => "non_positive_duration",
            Self::ExceedsBudget => "exceeds_budget",
            Self::DoesNotFit => "does_not_fit",
            Self::BudgetExhausted => "budget_exhausted",
        }
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An input activity that was not selected, with the stage that dropped it.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnscheduledActivity {
    #[pyo3(get)]
    pub name: String,
    pub reason: ExclusionReason,
}

#[pymethods]
impl UnscheduledActivity {
    #[getter(reason)]
    fn py_reason(&self) -> &'static str {
        self.reason.as_str()
    }

    fn __repr__(&self) -> String {
        format!(
            "UnscheduledActivity(name={:?}, reason={})",
            self.name, self.reason
        )
    }
}

impl UnscheduledActivity {
    pub fn new(name: impl Into<String>, reason: ExclusionReason) -> Self {
        Self {
            name: name.into(),
            reason,
        }
    }
}

/// Result of one scheduling invocation.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Selected activities in selection order; a partial activity can only be last.
    #[pyo3(get)]
    pub selected: Vec<Activity>,
    /// Activities of the input set that were dropped, in the order they were dropped.
    #[pyo3(get)]
    pub unscheduled: Vec<UnscheduledActivity>,
    #[pyo3(get)]
    pub used_time: f64,
    #[pyo3(get)]
    pub total_value: f64,
    /// Original name of the activity that was cut to fit, when the selection ends with a partial.
    #[pyo3(get)]
    pub partial_of: Option<String>,
}

#[pymethods]
impl ScheduleResult {
    /// JSON array of the selected activity records.
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.selected)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn __len__(&self) -> usize {
        self.selected.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(selected={}, unscheduled={}, used_time={}, total_value={})",
            self.selected.len(),
            self.unscheduled.len(),
            self.used_time,
            self.total_value
        )
    }
}

impl ScheduleResult {
    /// Build a result from the selection, totalling its time and value.
    pub fn from_selection(selected: Vec<Activity>, unscheduled: Vec<UnscheduledActivity>) -> Self {
        let used_time = selected.iter().map(|a| a.duration).sum();
        let total_value = selected.iter().map(|a| a.value).sum();
        Self {
            selected,
            unscheduled,
            used_time,
            total_value,
            partial_of: None,
        }
    }

    /// Names of the selected activities, in order.
    pub fn selected_names(&self) -> Vec<&str> {
        self.selected.iter().map(|a| a.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_activity(name: &str, value: f64, duration: f64) -> Activity {
        Activity::new(name.to_string(), value, duration, None, false, false)
    }

    #[test]
    fn test_value_density() {
        assert_eq!(make_activity("a", 10.0, 4.0).value_density(), Some(2.5));
        assert_eq!(make_activity("zero", 10.0, 0.0).value_density(), None);
        assert_eq!(make_activity("neg", 10.0, -2.0).value_density(), None);
    }

    #[test]
    fn test_partial_scales_value() {
        let mut original = make_activity("Leetcode", 6.0, 6.0);
        original.dependencies = vec!["x".to_string()];
        original.mandatory = true;
        original.fractionable = true;

        let partial = original.partial(3.0, " (Partial)");

        assert_eq!(partial.name, "Leetcode (Partial)");
        assert_eq!(partial.value, 6.0 * (3.0 / 6.0));
        assert_eq!(partial.duration, 3.0);
        assert!(partial.dependencies.is_empty());
        assert!(!partial.mandatory);
        assert!(!partial.fractionable);
    }

    #[test]
    fn test_json_defaults() {
        let activity: Activity =
            serde_json::from_str(r#"{"name": "a", "value": 3, "duration": 2}"#).unwrap();
        assert_eq!(activity, make_activity("a", 3.0, 2.0));
    }

    #[test]
    fn test_result_totals() {
        let result = ScheduleResult::from_selection(
            vec![make_activity("a", 10.0, 5.0), make_activity("b", 3.0, 3.0)],
            vec![UnscheduledActivity::new("c", ExclusionReason::DoesNotFit)],
        );
        assert_eq!(result.used_time, 8.0);
        assert_eq!(result.total_value, 13.0);
        assert_eq!(result.selected_names(), vec!["a", "b"]);
        assert_eq!(result.partial_of, None);
    }

    #[test]
    fn test_reason_serializes_snake_case() {
        let json = serde_json::to_string(&ExclusionReason::BlockedDependency).unwrap();
        assert_eq!(json, "\"blocked_dependency\"");
        assert_eq!(ExclusionReason::ExceedsBudget.to_string(), "exceeds_budget");
    }
}
