//! Validation with error accumulation for configuration.
//!
//! Every field is checked and every problem is collected before reporting, so
//! a user sees all configuration issues in a single run instead of fixing them
//! one at a time. Each check runs the same refined predicate the engine's
//! constructors use, so a config that validates always builds.

use stillwater::{NonEmptyVec, Validation};

use super::core::ThresholdConfig;
use crate::core::refined::{
    parse_bed_count, parse_grid_size, parse_positive, parse_prevalence, parse_probability,
};
use crate::core::{ClinicalSetting, CurveShape};
use crate::engine::EvaluationRequest;
use crate::errors::{ConfigError, EngineError, EngineResult};
use crate::optimizer::OptimizerConfig;

/// Validation result carrying every section-prefixed problem found.
pub type ConfigValidation<T> = Validation<T, NonEmptyVec<String>>;

/// Lift a single field check into an accumulating validation.
fn check<T>(section: &str, result: EngineResult<T>) -> ConfigValidation<()> {
    match result {
        Ok(_) => Validation::Success(()),
        Err(err) => {
            Validation::Failure(NonEmptyVec::new(format!("{section}: {err}"), Vec::new()))
        }
    }
}

/// Combine validations, keeping every success or every failure.
pub fn combine_validations<T>(validations: Vec<ConfigValidation<T>>) -> ConfigValidation<Vec<T>> {
    let mut successes = Vec::new();
    let mut failures = Vec::new();

    for v in validations {
        match v {
            Validation::Success(value) => successes.push(value),
            Validation::Failure(errors) => failures.extend(errors),
        }
    }

    match NonEmptyVec::from_vec(failures) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(successes),
    }
}

/// Validate every field of `config`, accumulating all problems found.
///
/// # Example
///
/// ```rust
/// use sepsis_threshold::config::{validation::validate_config, ThresholdConfig};
///
/// assert!(validate_config(&ThresholdConfig::default()).is_success());
/// ```
pub fn validate_config(config: &ThresholdConfig) -> ConfigValidation<()> {
    let clinical = config.clinical();
    let curve = config.curve();
    let evaluation = config.evaluation();

    let checks = vec![
        check("clinical", parse_bed_count(clinical.bed_count)),
        check("clinical", parse_positive("average_stay_days", clinical.average_stay_days)),
        check("clinical", parse_positive("minutes_per_alert", clinical.minutes_per_alert)),
        check("clinical", parse_positive("available_staff_hours", clinical.available_staff_hours)),
        check("curve", parse_positive("sensitivity_exponent", curve.sensitivity_exponent)),
        check("curve", parse_positive("specificity_exponent", curve.specificity_exponent)),
        check("curve", parse_positive("alert_rate_exponent", curve.alert_rate_exponent)),
        check("evaluation", parse_prevalence("prevalence", evaluation.prevalence)),
        check("evaluation", parse_probability("threshold", evaluation.threshold)),
        check("evaluation", parse_probability("min_sensitivity", evaluation.min_sensitivity)),
        check("evaluation", parse_grid_size(evaluation.grid_size)),
    ];

    combine_validations(checks).map(|_| ())
}

/// Validate `config` and convert it into an evaluation request.
pub fn build_request(config: &ThresholdConfig) -> Result<EvaluationRequest, ConfigError> {
    if let Validation::Failure(errors) = validate_config(config) {
        return Err(ConfigError::Invalid {
            problems: errors.into_vec(),
        });
    }

    let into_invalid = |err: EngineError| ConfigError::Invalid {
        problems: vec![err.to_string()],
    };

    let clinical = config.clinical();
    let curve = config.curve();
    let evaluation = config.evaluation();

    Ok(EvaluationRequest {
        setting: ClinicalSetting::new(
            clinical.bed_count,
            clinical.average_stay_days,
            clinical.minutes_per_alert,
            clinical.available_staff_hours,
        )
        .map_err(into_invalid)?,
        shape: CurveShape::new(
            curve.sensitivity_exponent,
            curve.specificity_exponent,
            curve.alert_rate_exponent,
        )
        .map_err(into_invalid)?,
        prevalence: evaluation.prevalence,
        threshold: evaluation.threshold,
        grid_size: evaluation.grid_size,
        optimizer: OptimizerConfig::new(evaluation.min_sensitivity).map_err(into_invalid)?,
        parallel: config.parallel(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClinicalConfig, EvaluationConfig};

    fn problems(validation: ConfigValidation<()>) -> Vec<String> {
        match validation {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.into_vec(),
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ThresholdConfig::default()).is_success());
        let request = build_request(&ThresholdConfig::default()).unwrap();
        assert_eq!(request, EvaluationRequest::default());
    }

    #[test]
    fn accumulates_all_problems() {
        let config = ThresholdConfig {
            clinical: Some(ClinicalConfig {
                bed_count: 0,
                available_staff_hours: -1.0,
                ..Default::default()
            }),
            evaluation: Some(EvaluationConfig {
                prevalence: 1.0,
                grid_size: 0,
                ..Default::default()
            }),
            ..Default::default()
        };
        let problems = problems(validate_config(&config));
        assert_eq!(problems.len(), 4, "{problems:#?}");
        assert!(problems.iter().any(|p| p.contains("bed_count")));
        assert!(problems.iter().any(|p| p.contains("available_staff_hours")));
        assert!(problems.iter().any(|p| p.contains("prevalence")));
        assert!(problems.iter().any(|p| p.contains("grid_size")));
    }

    #[test]
    fn oversized_grid_is_reported_once() {
        let config = ThresholdConfig {
            evaluation: Some(EvaluationConfig {
                grid_size: 100_001,
                ..Default::default()
            }),
            ..Default::default()
        };
        let problems = problems(validate_config(&config));
        assert_eq!(
            problems,
            vec!["evaluation: Invalid parameter `grid_size` = 100001: must be between 1 and 100000"]
        );
    }

    #[test]
    fn combine_keeps_successes_in_order() {
        let combined: ConfigValidation<Vec<i32>> =
            combine_validations(vec![Validation::Success(1), Validation::Success(2)]);
        match combined {
            Validation::Success(values) => assert_eq!(values, vec![1, 2]),
            Validation::Failure(errors) => panic!("unexpected: {:?}", errors.into_vec()),
        }
    }

    #[test]
    fn combine_collects_every_failure() {
        let combined = combine_validations(vec![
            check("a", parse_positive("minutes_per_alert", 5.0)),
            check("b", parse_probability("threshold", 2.0)),
            check("c", parse_prevalence("prevalence", 0.0)),
        ]);
        assert!(combined.is_failure());
        let problems = problems(combined.map(|_| ()));
        assert_eq!(problems.len(), 2);
        assert!(problems[0].starts_with("b: "));
        assert!(problems[1].starts_with("c: "));
    }

    #[test]
    fn build_request_reports_invalid_config() {
        let config = ThresholdConfig {
            evaluation: Some(EvaluationConfig {
                threshold: 2.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        match build_request(&config) {
            Err(ConfigError::Invalid { problems }) => {
                assert_eq!(problems.len(), 1);
                assert!(problems[0].starts_with("evaluation:"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
