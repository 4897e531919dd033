//! Per-threshold metric snapshots.
//!
//! Each layer extends the previous one: a [`PerformancePoint`] holds the curve
//! outputs, a [`PrevalenceAdjustedPoint`] adds predictive values and a
//! [`WorkloadPoint`] adds the staffing cost. Serialized forms are flattened so
//! a sweep exports as a flat table.

use serde::{Deserialize, Serialize};

/// Curve outputs at one threshold.
///
/// Also the record format of a measured operating point when a
/// [`crate::curve::TabulatedCurve`] is loaded from JSON or TOML.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub threshold: f64,
    pub sensitivity: f64,
    pub specificity: f64,
    pub alert_rate: f64,
}

impl PerformancePoint {
    /// Youden's J statistic: `sensitivity + specificity - 1`.
    pub fn youden_j(&self) -> f64 {
        crate::metrics::youden_j(self.sensitivity, self.specificity)
    }
}

/// Positive and negative predictive value for a given prevalence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictiveValues {
    pub ppv: f64,
    pub npv: f64,
}

/// Performance point with predictive values.
///
/// A predictive value is `None` when its denominator is zero at this
/// threshold, and serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrevalenceAdjustedPoint {
    #[serde(flatten)]
    pub performance: PerformancePoint,
    pub ppv: Option<f64>,
    pub npv: Option<f64>,
}

/// Expected alert volume and the staff time it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Workload {
    pub alerts_per_day: f64,
    pub staff_hours_needed: f64,
}

/// Everything known about one threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkloadPoint {
    #[serde(flatten)]
    pub adjusted: PrevalenceAdjustedPoint,
    #[serde(flatten)]
    pub workload: Workload,
}

impl WorkloadPoint {
    pub fn threshold(&self) -> f64 {
        self.adjusted.performance.threshold
    }

    pub fn sensitivity(&self) -> f64 {
        self.adjusted.performance.sensitivity
    }

    pub fn specificity(&self) -> f64 {
        self.adjusted.performance.specificity
    }

    pub fn alert_rate(&self) -> f64 {
        self.adjusted.performance.alert_rate
    }

    /// `None` when no patient is flagged at this threshold.
    pub fn ppv(&self) -> Option<f64> {
        self.adjusted.ppv
    }

    /// `None` when every patient is flagged at this threshold.
    pub fn npv(&self) -> Option<f64> {
        self.adjusted.npv
    }

    pub fn alerts_per_day(&self) -> f64 {
        self.workload.alerts_per_day
    }

    pub fn staff_hours_needed(&self) -> f64 {
        self.workload.staff_hours_needed
    }

    pub fn youden_j(&self) -> f64 {
        self.adjusted.performance.youden_j()
    }

    /// Whether this point fits within `available_hours` of staff time.
    pub fn is_feasible(&self, available_hours: f64) -> bool {
        self.workload.staff_hours_needed <= available_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WorkloadPoint {
        WorkloadPoint {
            adjusted: PrevalenceAdjustedPoint {
                performance: PerformancePoint {
                    threshold: 0.3,
                    sensitivity: 0.8,
                    specificity: 0.7,
                    alert_rate: 0.4,
                },
                ppv: Some(0.2),
                npv: Some(0.95),
            },
            workload: Workload {
                alerts_per_day: 13.0,
                staff_hours_needed: 2.0,
            },
        }
    }

    #[test]
    fn youden_j_is_sum_minus_one() {
        assert!((sample().youden_j() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn feasibility_includes_equality() {
        let point = sample();
        assert!(point.is_feasible(2.0));
        assert!(!point.is_feasible(1.999));
    }

    #[test]
    fn serializes_as_flat_record() {
        let json = serde_json::to_value(sample()).unwrap();
        for key in [
            "threshold",
            "sensitivity",
            "specificity",
            "alert_rate",
            "ppv",
            "npv",
            "alerts_per_day",
            "staff_hours_needed",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn undefined_predictive_value_serializes_as_null() {
        let mut point = sample();
        point.adjusted.ppv = None;
        let json = serde_json::to_value(point).unwrap();
        assert!(json["ppv"].is_null());
        assert_eq!(json["npv"], 0.95);
    }
}
