//! Validated input types for an evaluation.
//!
//! Follows the "parse, don't validate" pattern: values are checked once at
//! construction and the private fields guarantee the invariants afterwards.

use serde::{Deserialize, Serialize};

use super::refined::{parse_bed_count, parse_positive};
use crate::errors::EngineResult;

/// Ward or unit parameters that drive alert workload.
///
/// All fields are strictly positive and finite.
///
/// # Example
///
/// ```rust
/// use sepsis_threshold::core::ClinicalSetting;
///
/// let setting = ClinicalSetting::new(100, 3.0, 10.0, 24.0).unwrap();
/// assert!((setting.patients_per_day() - 33.333).abs() < 1e-3);
/// assert!(ClinicalSetting::new(0, 3.0, 10.0, 24.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClinicalSetting {
    bed_count: u32,
    average_stay_days: f64,
    minutes_per_alert: f64,
    available_staff_hours: f64,
}

impl ClinicalSetting {
    pub fn new(
        bed_count: u32,
        average_stay_days: f64,
        minutes_per_alert: f64,
        available_staff_hours: f64,
    ) -> EngineResult<Self> {
        Ok(Self {
            bed_count: parse_bed_count(bed_count)?,
            average_stay_days: parse_positive("average_stay_days", average_stay_days)?,
            minutes_per_alert: parse_positive("minutes_per_alert", minutes_per_alert)?,
            available_staff_hours: parse_positive("available_staff_hours", available_staff_hours)?,
        })
    }

    pub fn bed_count(&self) -> u32 {
        self.bed_count
    }

    pub fn average_stay_days(&self) -> f64 {
        self.average_stay_days
    }

    pub fn minutes_per_alert(&self) -> f64 {
        self.minutes_per_alert
    }

    pub fn available_staff_hours(&self) -> f64 {
        self.available_staff_hours
    }

    /// Patient throughput: beds divided by average length of stay.
    pub fn patients_per_day(&self) -> f64 {
        f64::from(self.bed_count) / self.average_stay_days
    }

    /// Copy of this setting with a different staffing budget.
    pub fn with_available_staff_hours(&self, hours: f64) -> EngineResult<Self> {
        Ok(Self {
            available_staff_hours: parse_positive("available_staff_hours", hours)?,
            ..*self
        })
    }
}

impl Default for ClinicalSetting {
    /// 100 beds, 3 day stay, 10 minutes per alert, 24 staff hours per day.
    fn default() -> Self {
        Self {
            bed_count: 100,
            average_stay_days: 3.0,
            minutes_per_alert: 10.0,
            available_staff_hours: 24.0,
        }
    }
}

impl<'de> Deserialize<'de> for ClinicalSetting {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            bed_count: u32,
            average_stay_days: f64,
            minutes_per_alert: f64,
            available_staff_hours: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(
            raw.bed_count,
            raw.average_stay_days,
            raw.minutes_per_alert,
            raw.available_staff_hours,
        )
        .map_err(serde::de::Error::custom)
    }
}

/// Steepness of each metric's response to the threshold.
///
/// Exponents are finite and strictly positive. Dashboards conventionally
/// offer [`CurveShape::CONVENTIONAL_MIN`]..=[`CurveShape::CONVENTIONAL_MAX`];
/// the engine itself accepts any positive value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveShape {
    sensitivity_exponent: f64,
    specificity_exponent: f64,
    alert_rate_exponent: f64,
}

impl CurveShape {
    pub const CONVENTIONAL_MIN: f64 = 0.1;
    pub const CONVENTIONAL_MAX: f64 = 2.0;

    pub fn new(
        sensitivity_exponent: f64,
        specificity_exponent: f64,
        alert_rate_exponent: f64,
    ) -> EngineResult<Self> {
        Ok(Self {
            sensitivity_exponent: parse_positive("sensitivity_exponent", sensitivity_exponent)?,
            specificity_exponent: parse_positive("specificity_exponent", specificity_exponent)?,
            alert_rate_exponent: parse_positive("alert_rate_exponent", alert_rate_exponent)?,
        })
    }

    /// All three exponents equal to one.
    pub fn linear() -> Self {
        Self {
            sensitivity_exponent: 1.0,
            specificity_exponent: 1.0,
            alert_rate_exponent: 1.0,
        }
    }

    pub fn sensitivity_exponent(&self) -> f64 {
        self.sensitivity_exponent
    }

    pub fn specificity_exponent(&self) -> f64 {
        self.specificity_exponent
    }

    pub fn alert_rate_exponent(&self) -> f64 {
        self.alert_rate_exponent
    }

    /// Whether every exponent lies within the conventional UI range.
    pub fn is_conventional(&self) -> bool {
        let range = Self::CONVENTIONAL_MIN..=Self::CONVENTIONAL_MAX;
        range.contains(&self.sensitivity_exponent)
            && range.contains(&self.specificity_exponent)
            && range.contains(&self.alert_rate_exponent)
    }
}

impl Default for CurveShape {
    fn default() -> Self {
        Self {
            sensitivity_exponent: 0.7,
            specificity_exponent: 0.6,
            alert_rate_exponent: 1.2,
        }
    }
}

impl<'de> Deserialize<'de> for CurveShape {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            sensitivity_exponent: f64,
            specificity_exponent: f64,
            alert_rate_exponent: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(
            raw.sensitivity_exponent,
            raw.specificity_exponent,
            raw.alert_rate_exponent,
        )
        .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;

    #[test]
    fn patients_per_day_divides_beds_by_stay() {
        let setting = ClinicalSetting::new(100, 3.0, 10.0, 24.0).unwrap();
        assert!((setting.patients_per_day() - 100.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_fields() {
        assert!(ClinicalSetting::new(0, 3.0, 10.0, 24.0).is_err());
        assert!(ClinicalSetting::new(10, 0.0, 10.0, 24.0).is_err());
        assert!(ClinicalSetting::new(10, 3.0, -1.0, 24.0).is_err());
        assert!(ClinicalSetting::new(10, 3.0, 10.0, 0.0).is_err());
    }

    #[test]
    fn rejection_names_the_offending_field() {
        let err = ClinicalSetting::new(10, 3.0, 10.0, -2.0).unwrap_err();
        match err {
            EngineError::InvalidParameter { parameter, .. } => {
                assert_eq!(parameter, "available_staff_hours")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn with_available_staff_hours_keeps_other_fields() {
        let setting = ClinicalSetting::default().with_available_staff_hours(1.0).unwrap();
        assert_eq!(setting.bed_count(), 100);
        assert_eq!(setting.available_staff_hours(), 1.0);
    }

    #[test]
    fn curve_shape_rejects_zero_exponent() {
        assert!(CurveShape::new(0.0, 1.0, 1.0).is_err());
        assert!(CurveShape::new(1.0, f64::NAN, 1.0).is_err());
        assert!(CurveShape::new(1.0, 1.0, -0.5).is_err());
    }

    #[test]
    fn curve_shape_outside_ui_range_is_still_valid() {
        let shape = CurveShape::new(5.0, 0.05, 1.0).unwrap();
        assert!(!shape.is_conventional());
        assert!(CurveShape::default().is_conventional());
    }

    #[test]
    fn deserialize_validates_fields() {
        let ok: ClinicalSetting = serde_json::from_str(
            r#"{"bed_count":20,"average_stay_days":2.0,"minutes_per_alert":5.0,"available_staff_hours":8.0}"#,
        )
        .unwrap();
        assert_eq!(ok.bed_count(), 20);

        let bad = serde_json::from_str::<CurveShape>(
            r#"{"sensitivity_exponent":0.0,"specificity_exponent":1.0,"alert_rate_exponent":1.0}"#,
        );
        assert!(bad.is_err());
    }
}
