use serde::{Deserialize, Serialize};

use super::CurveModel;
use crate::core::refined::parse_probability;
use crate::core::PerformancePoint;
use crate::errors::{EngineError, EngineResult};

/// Curve built from measured operating points, linearly interpolated.
///
/// Points must have strictly ascending thresholds and satisfy the monotonicity
/// invariants. Thresholds before the first or after the last point evaluate to
/// that end point's metrics.
///
/// # Example
///
/// ```rust
/// use sepsis_threshold::core::PerformancePoint;
/// use sepsis_threshold::curve::{CurveModel, TabulatedCurve};
///
/// let curve = TabulatedCurve::new(vec![
///     PerformancePoint { threshold: 0.0, sensitivity: 1.0, specificity: 0.2, alert_rate: 0.9 },
///     PerformancePoint { threshold: 1.0, sensitivity: 0.0, specificity: 1.0, alert_rate: 0.1 },
/// ]).unwrap();
/// let mid = curve.evaluate(0.5).unwrap();
/// assert!((mid.sensitivity - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TabulatedCurve {
    points: Vec<PerformancePoint>,
}

impl<'de> Deserialize<'de> for TabulatedCurve {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let points = Vec::<PerformancePoint>::deserialize(deserializer)?;
        Self::new(points).map_err(serde::de::Error::custom)
    }
}

impl TabulatedCurve {
    pub fn new(points: Vec<PerformancePoint>) -> EngineResult<Self> {
        if points.len() < 2 {
            return Err(EngineError::invalid(
                "tabulated_points",
                points.len() as f64,
                "at least two operating points are required",
            ));
        }

        for point in &points {
            parse_probability("threshold", point.threshold)?;
            parse_probability("sensitivity", point.sensitivity)?;
            parse_probability("specificity", point.specificity)?;
            parse_probability("alert_rate", point.alert_rate)?;
        }

        for pair in points.windows(2) {
            check_monotonic(&pair[0], &pair[1])?;
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[PerformancePoint] {
        &self.points
    }
}

fn check_monotonic(prev: &PerformancePoint, next: &PerformancePoint) -> EngineResult<()> {
    if next.threshold <= prev.threshold {
        return Err(EngineError::invalid(
            "threshold",
            next.threshold,
            format!(
                "tabulated thresholds must be strictly ascending (follows {})",
                prev.threshold
            ),
        ));
    }
    if next.sensitivity > prev.sensitivity {
        return Err(EngineError::invalid(
            "sensitivity",
            next.sensitivity,
            format!("sensitivity increases at threshold {}", next.threshold),
        ));
    }
    if next.specificity < prev.specificity {
        return Err(EngineError::invalid(
            "specificity",
            next.specificity,
            format!("specificity decreases at threshold {}", next.threshold),
        ));
    }
    if next.alert_rate > prev.alert_rate {
        return Err(EngineError::invalid(
            "alert_rate",
            next.alert_rate,
            format!("alert rate increases at threshold {}", next.threshold),
        ));
    }
    Ok(())
}

fn lerp(a: f64, b: f64, fraction: f64) -> f64 {
    a + (b - a) * fraction
}

impl CurveModel for TabulatedCurve {
    fn evaluate(&self, threshold: f64) -> EngineResult<PerformancePoint> {
        let threshold = parse_probability("threshold", threshold)?;

        // Index of the first point with a threshold strictly greater.
        let upper = self.points.partition_point(|p| p.threshold <= threshold);
        let (lo, hi) = match upper {
            0 => (&self.points[0], &self.points[0]),
            n if n == self.points.len() => (&self.points[n - 1], &self.points[n - 1]),
            n => (&self.points[n - 1], &self.points[n]),
        };

        let span = hi.threshold - lo.threshold;
        let fraction = if span > 0.0 {
            (threshold - lo.threshold) / span
        } else {
            0.0
        };

        Ok(PerformancePoint {
            threshold,
            sensitivity: lerp(lo.sensitivity, hi.sensitivity, fraction).clamp(0.0, 1.0),
            specificity: lerp(lo.specificity, hi.specificity, fraction).clamp(0.0, 1.0),
            alert_rate: lerp(lo.alert_rate, hi.alert_rate, fraction).clamp(0.0, 1.0),
        })
    }
}
