//! Prevalence-dependent metrics derived from curve outputs.

use tracing::trace;

use crate::core::refined::{parse_prevalence, parse_probability};
use crate::core::{PerformancePoint, PredictiveValues, PrevalenceAdjustedPoint};
use crate::errors::{EngineError, EngineResult, PredictiveMetric};

/// Positive and negative predictive value.
///
/// ```text
/// ppv = sens*prev / (sens*prev + (1-spec)*(1-prev))
/// npv = spec*(1-prev) / ((1-sens)*prev + spec*(1-prev))
/// ```
///
/// Prevalence must be strictly inside `(0, 1)`. A zero denominator yields
/// [`EngineError::UndefinedMetric`] instead of NaN.
///
/// # Example
///
/// ```rust
/// use sepsis_threshold::metrics::predictive_values;
///
/// let pv = predictive_values(0.0, 0.0, 0.5).unwrap();
/// assert_eq!(pv.npv, 0.0);
/// ```
pub fn predictive_values(
    sensitivity: f64,
    specificity: f64,
    prevalence: f64,
) -> EngineResult<PredictiveValues> {
    let rates = OutcomeRates::new(sensitivity, specificity, prevalence)?;
    Ok(PredictiveValues {
        ppv: rates.ppv()?,
        npv: rates.npv()?,
    })
}

/// Joint probability of each alert outcome for a random patient.
struct OutcomeRates {
    sensitivity: f64,
    specificity: f64,
    prevalence: f64,
    true_positive: f64,
    false_positive: f64,
    true_negative: f64,
    false_negative: f64,
}

impl OutcomeRates {
    fn new(sensitivity: f64, specificity: f64, prevalence: f64) -> EngineResult<Self> {
        let sens = parse_probability("sensitivity", sensitivity)?;
        let spec = parse_probability("specificity", specificity)?;
        let prev = parse_prevalence("prevalence", prevalence)?;
        Ok(Self {
            sensitivity: sens,
            specificity: spec,
            prevalence: prev,
            true_positive: sens * prev,
            false_positive: (1.0 - spec) * (1.0 - prev),
            true_negative: spec * (1.0 - prev),
            false_negative: (1.0 - sens) * prev,
        })
    }

    fn ppv(&self) -> EngineResult<f64> {
        self.ratio(
            PredictiveMetric::Ppv,
            self.true_positive,
            self.true_positive + self.false_positive,
        )
    }

    fn npv(&self) -> EngineResult<f64> {
        self.ratio(
            PredictiveMetric::Npv,
            self.true_negative,
            self.false_negative + self.true_negative,
        )
    }

    fn ratio(&self, metric: PredictiveMetric, numerator: f64, denominator: f64) -> EngineResult<f64> {
        if denominator == 0.0 {
            return Err(EngineError::UndefinedMetric {
                metric,
                sensitivity: self.sensitivity,
                specificity: self.specificity,
                prevalence: self.prevalence,
            });
        }
        Ok((numerator / denominator).clamp(0.0, 1.0))
    }
}

/// Youden's J statistic.
pub fn youden_j(sensitivity: f64, specificity: f64) -> f64 {
    sensitivity + specificity - 1.0
}

/// Attach predictive values to a curve point.
///
/// Out-of-range inputs are errors. A predictive value whose denominator is
/// zero is recorded as `None` on the point, so a single degenerate threshold
/// (for example `t = 1` on the reference curve, where nothing is flagged) does
/// not stop the rest of an evaluation.
pub fn adjust_for_prevalence(
    point: PerformancePoint,
    prevalence: f64,
) -> EngineResult<PrevalenceAdjustedPoint> {
    let rates = OutcomeRates::new(point.sensitivity, point.specificity, prevalence)?;
    let ppv = rates.ppv().ok();
    let npv = rates.npv().ok();
    if ppv.is_none() || npv.is_none() {
        trace!(threshold = point.threshold, ?ppv, ?npv, "Predictive value undefined");
    }
    Ok(PrevalenceAdjustedPoint {
        performance: point,
        ppv,
        npv,
    })
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn predictive_values_stay_in_unit_interval(
            sens in 0.0..=1.0f64,
            spec in 0.0..=1.0f64,
            prev in 0.001..0.999f64,
        ) {
            match predictive_values(sens, spec, prev) {
                Ok(pv) => {
                    prop_assert!((0.0..=1.0).contains(&pv.ppv));
                    prop_assert!((0.0..=1.0).contains(&pv.npv));
                }
                Err(EngineError::UndefinedMetric { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }
    }
}
