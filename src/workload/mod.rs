//! Alert volume and staffing cost.

use serde::Serialize;

use crate::core::refined::parse_probability;
use crate::core::{ClinicalSetting, PrevalenceAdjustedPoint, Workload, WorkloadPoint};
use crate::errors::EngineResult;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Alerts per day and staff hours needed to respond to them.
///
/// # Example
///
/// ```rust
/// use sepsis_threshold::core::ClinicalSetting;
/// use sepsis_threshold::workload::workload;
///
/// let setting = ClinicalSetting::new(100, 3.0, 10.0, 24.0).unwrap();
/// let w = workload(0.4, &setting).unwrap();
/// assert!((w.alerts_per_day - 13.333).abs() < 1e-3);
/// assert!((w.staff_hours_needed - 2.222).abs() < 1e-3);
/// ```
pub fn workload(alert_rate: f64, setting: &ClinicalSetting) -> EngineResult<Workload> {
    let alert_rate = parse_probability("alert_rate", alert_rate)?;
    let alerts_per_day = alert_rate * setting.patients_per_day();
    Ok(Workload {
        alerts_per_day,
        staff_hours_needed: alerts_per_day * setting.minutes_per_alert() / MINUTES_PER_HOUR,
    })
}

/// Attach workload to a prevalence-adjusted point.
pub fn with_workload(
    point: PrevalenceAdjustedPoint,
    setting: &ClinicalSetting,
) -> EngineResult<WorkloadPoint> {
    Ok(WorkloadPoint {
        adjusted: point,
        workload: workload(point.performance.alert_rate, setting)?,
    })
}

/// Whether a staffing requirement fits the available budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StaffingStatus {
    Feasible { spare_hours: f64, utilization: f64 },
    Overloaded { excess_hours: f64, utilization: f64 },
}

impl StaffingStatus {
    /// Compare needed hours against the setting's budget. Equality is feasible.
    pub fn assess(staff_hours_needed: f64, setting: &ClinicalSetting) -> Self {
        let available = setting.available_staff_hours();
        let utilization = staff_hours_needed / available;
        if staff_hours_needed <= available {
            Self::Feasible {
                spare_hours: available - staff_hours_needed,
                utilization,
            }
        } else {
            Self::Overloaded {
                excess_hours: staff_hours_needed - available,
                utilization,
            }
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible { .. })
    }

    /// Needed hours as a fraction of available hours.
    pub fn utilization(&self) -> f64 {
        match *self {
            Self::Feasible { utilization, .. } | Self::Overloaded { utilization, .. } => {
                utilization
            }
        }
    }
}
