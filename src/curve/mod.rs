//! Threshold → performance curves.
//!
//! The engine talks to curves only through [`CurveModel`], so any monotonic
//! relationship can be plugged in. Two implementations ship with the crate:
//!
//! - [`PowerLawCurve`]: the parametric reference shapes
//! - [`TabulatedCurve`]: linear interpolation over measured operating points
//!
//! Every admissible curve satisfies, for `t1 < t2`:
//! sensitivity and alert rate do not increase, specificity does not decrease,
//! and all three stay within `[0, 1]`.
//!
//! Thresholds outside `[0, 1]` are rejected, never clamped.

mod tabulated;

pub use tabulated::TabulatedCurve;

use crate::core::refined::{parse_positive, parse_probability};
use crate::core::{CurveShape, PerformancePoint};
use crate::errors::EngineResult;

/// A monotonic mapping from threshold to sensitivity, specificity and alert rate.
///
/// Implementations must be pure: the same threshold always yields the same point.
pub trait CurveModel: Send + Sync {
    fn evaluate(&self, threshold: f64) -> EngineResult<PerformancePoint>;
}

/// `clamp(1 - t^e, 0, 1)`
pub fn sensitivity(threshold: f64, exponent: f64) -> EngineResult<f64> {
    let (t, e) = check_inputs("sensitivity_exponent", threshold, exponent)?;
    Ok((1.0 - t.powf(e)).clamp(0.0, 1.0))
}

/// `clamp(0.4 + 0.6 * t^e, 0, 1)`
pub fn specificity(threshold: f64, exponent: f64) -> EngineResult<f64> {
    let (t, e) = check_inputs("specificity_exponent", threshold, exponent)?;
    Ok((0.4 + 0.6 * t.powf(e)).clamp(0.0, 1.0))
}

/// `clamp(0.8 - 0.7 * t^e, 0, 1)`
pub fn alert_rate(threshold: f64, exponent: f64) -> EngineResult<f64> {
    let (t, e) = check_inputs("alert_rate_exponent", threshold, exponent)?;
    Ok((0.8 - 0.7 * t.powf(e)).clamp(0.0, 1.0))
}

fn check_inputs(
    exponent_name: &'static str,
    threshold: f64,
    exponent: f64,
) -> EngineResult<(f64, f64)> {
    Ok((
        parse_probability("threshold", threshold)?,
        parse_positive(exponent_name, exponent)?,
    ))
}

/// Reference power-law curves parameterized by a [`CurveShape`].
///
/// # Example
///
/// ```rust
/// use sepsis_threshold::core::CurveShape;
/// use sepsis_threshold::curve::{CurveModel, PowerLawCurve};
///
/// let curve = PowerLawCurve::new(CurveShape::linear());
/// let point = curve.evaluate(1.0).unwrap();
/// assert_eq!(point.sensitivity, 0.0);
/// assert_eq!(point.specificity, 1.0);
/// assert!((point.alert_rate - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PowerLawCurve {
    shape: CurveShape,
}

impl PowerLawCurve {
    pub fn new(shape: CurveShape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> CurveShape {
        self.shape
    }
}

impl CurveModel for PowerLawCurve {
    fn evaluate(&self, threshold: f64) -> EngineResult<PerformancePoint> {
        Ok(PerformancePoint {
            threshold,
            sensitivity: sensitivity(threshold, self.shape.sensitivity_exponent())?,
            specificity: specificity(threshold, self.shape.specificity_exponent())?,
            alert_rate: alert_rate(threshold, self.shape.alert_rate_exponent())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;

    #[test]
    fn linear_curve_at_zero() {
        let point = PowerLawCurve::new(CurveShape::linear()).evaluate(0.0).unwrap();
        assert_eq!(point.sensitivity, 1.0);
        assert!((point.specificity - 0.4).abs() < 1e-12);
        assert!((point.alert_rate - 0.8).abs() < 1e-12);
    }

    #[test]
    fn linear_curve_at_one() {
        let point = PowerLawCurve::new(CurveShape::linear()).evaluate(1.0).unwrap();
        assert_eq!(point.sensitivity, 0.0);
        assert_eq!(point.specificity, 1.0);
        assert!((point.alert_rate - 0.1).abs() < 1e-12);
    }

    #[test]
    fn default_shape_at_midpoint() {
        let point = PowerLawCurve::default().evaluate(0.5).unwrap();
        assert!((point.sensitivity - (1.0 - 0.5f64.powf(0.7))).abs() < 1e-12);
        assert!((point.specificity - (0.4 + 0.6 * 0.5f64.powf(0.6))).abs() < 1e-12);
        assert!((point.alert_rate - (0.8 - 0.7 * 0.5f64.powf(1.2))).abs() < 1e-12);
    }

    #[test]
    fn rejects_threshold_outside_unit_interval() {
        for t in [-0.01, 1.01, f64::NAN] {
            match sensitivity(t, 1.0) {
                Err(EngineError::InvalidParameter { parameter, .. }) => {
                    assert_eq!(parameter, "threshold")
                }
                other => panic!("expected rejection for {t}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_positive_exponent() {
        assert!(specificity(0.5, 0.0).is_err());
        assert!(alert_rate(0.5, -1.0).is_err());
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let curve = PowerLawCurve::default();
        let a = curve.evaluate(0.37).unwrap();
        let b = curve.evaluate(0.37).unwrap();
        assert_eq!(a.sensitivity.to_bits(), b.sensitivity.to_bits());
        assert_eq!(a.specificity.to_bits(), b.specificity.to_bits());
        assert_eq!(a.alert_rate.to_bits(), b.alert_rate.to_bits());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn shape_strategy() -> impl Strategy<Value = CurveShape> {
        (0.05..5.0f64, 0.05..5.0f64, 0.05..5.0f64)
            .prop_map(|(s, p, a)| CurveShape::new(s, p, a).unwrap())
    }

    proptest! {
        #[test]
        fn metrics_are_monotonic(shape in shape_strategy(), a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let curve = PowerLawCurve::new(shape);
            let p_lo = curve.evaluate(lo).unwrap();
            let p_hi = curve.evaluate(hi).unwrap();
            prop_assert!(p_hi.sensitivity <= p_lo.sensitivity);
            prop_assert!(p_hi.specificity >= p_lo.specificity);
            prop_assert!(p_hi.alert_rate <= p_lo.alert_rate);
        }

        #[test]
        fn metrics_stay_in_unit_interval(shape in shape_strategy(), t in 0.0..=1.0f64) {
            let point = PowerLawCurve::new(shape).evaluate(t).unwrap();
            for value in [point.sensitivity, point.specificity, point.alert_rate] {
                prop_assert!((0.0..=1.0).contains(&value));
            }
        }
    }
}
