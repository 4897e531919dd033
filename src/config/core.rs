use serde::{Deserialize, Serialize};

use super::parallel::ParallelConfig;
use crate::optimizer::DEFAULT_MIN_SENSITIVITY;
use crate::sweep::DEFAULT_GRID_SIZE;

/// Root configuration structure, read from `.sepsis-threshold.toml`.
///
/// Every section is optional; missing sections and fields fall back to the
/// built-in defaults. Values are unvalidated here; see
/// [`crate::config::validation`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ThresholdConfig {
    /// Ward parameters
    #[serde(default)]
    pub clinical: Option<ClinicalConfig>,

    /// Curve shape exponents
    #[serde(default)]
    pub curve: Option<CurveConfig>,

    /// Prevalence, threshold and optimizer settings
    #[serde(default)]
    pub evaluation: Option<EvaluationConfig>,

    /// Sweep parallelism
    #[serde(default)]
    pub parallel: Option<ParallelConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicalConfig {
    #[serde(default = "default_bed_count")]
    pub bed_count: u32,

    #[serde(default = "default_average_stay_days")]
    pub average_stay_days: f64,

    #[serde(default = "default_minutes_per_alert")]
    pub minutes_per_alert: f64,

    #[serde(default = "default_available_staff_hours")]
    pub available_staff_hours: f64,
}

impl Default for ClinicalConfig {
    fn default() -> Self {
        Self {
            bed_count: default_bed_count(),
            average_stay_days: default_average_stay_days(),
            minutes_per_alert: default_minutes_per_alert(),
            available_staff_hours: default_available_staff_hours(),
        }
    }
}

fn default_bed_count() -> u32 {
    100
}
fn default_average_stay_days() -> f64 {
    3.0
}
fn default_minutes_per_alert() -> f64 {
    10.0
}
fn default_available_staff_hours() -> f64 {
    24.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurveConfig {
    #[serde(default = "default_sensitivity_exponent")]
    pub sensitivity_exponent: f64,

    #[serde(default = "default_specificity_exponent")]
    pub specificity_exponent: f64,

    #[serde(default = "default_alert_rate_exponent")]
    pub alert_rate_exponent: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            sensitivity_exponent: default_sensitivity_exponent(),
            specificity_exponent: default_specificity_exponent(),
            alert_rate_exponent: default_alert_rate_exponent(),
        }
    }
}

fn default_sensitivity_exponent() -> f64 {
    0.7
}
fn default_specificity_exponent() -> f64 {
    0.6
}
fn default_alert_rate_exponent() -> f64 {
    1.2
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationConfig {
    /// Fraction of patients with sepsis, strictly between 0 and 1
    #[serde(default = "default_prevalence")]
    pub prevalence: f64,

    /// Threshold to report current metrics for
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Number of thresholds in the sweep
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,

    /// Sensitivity floor for the resource-efficient policy
    #[serde(default = "default_min_sensitivity")]
    pub min_sensitivity: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            prevalence: default_prevalence(),
            threshold: default_threshold(),
            grid_size: default_grid_size(),
            min_sensitivity: default_min_sensitivity(),
        }
    }
}

fn default_prevalence() -> f64 {
    0.1
}
fn default_threshold() -> f64 {
    0.5
}
fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}
fn default_min_sensitivity() -> f64 {
    DEFAULT_MIN_SENSITIVITY
}

impl ThresholdConfig {
    pub fn clinical(&self) -> ClinicalConfig {
        self.clinical.clone().unwrap_or_default()
    }

    pub fn curve(&self) -> CurveConfig {
        self.curve.clone().unwrap_or_default()
    }

    pub fn evaluation(&self) -> EvaluationConfig {
        self.evaluation.clone().unwrap_or_default()
    }

    pub fn parallel(&self) -> ParallelConfig {
        self.parallel.unwrap_or_default()
    }
}

/// Commented default config written by `sepsis-threshold init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# sepsis-threshold configuration

[clinical]
bed_count = 100
average_stay_days = 3.0
minutes_per_alert = 10.0
available_staff_hours = 24.0

[curve]
# Exponents must be > 0; 0.1 - 2.0 is the usual range
sensitivity_exponent = 0.7
specificity_exponent = 0.6
alert_rate_exponent = 1.2

[evaluation]
prevalence = 0.1
threshold = 0.5
grid_size = 99
min_sensitivity = 0.7

[parallel]
enabled = true
min_grid_size = 1024
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: ThresholdConfig = toml::from_str("").unwrap();
        assert_eq!(config, ThresholdConfig::default());
        assert_eq!(config.clinical(), ClinicalConfig::default());
        assert_eq!(config.evaluation().grid_size, 99);
    }

    #[test]
    fn partial_section_fills_missing_fields() {
        let config: ThresholdConfig = toml::from_str("[clinical]\nbed_count = 40\n").unwrap();
        let clinical = config.clinical();
        assert_eq!(clinical.bed_count, 40);
        assert_eq!(clinical.available_staff_hours, 24.0);
    }

    #[test]
    fn default_template_parses_to_defaults() {
        let config: ThresholdConfig = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config.clinical(), ClinicalConfig::default());
        assert_eq!(config.curve(), CurveConfig::default());
        assert_eq!(config.evaluation(), EvaluationConfig::default());
        assert_eq!(config.parallel(), ParallelConfig::default());
    }
}
