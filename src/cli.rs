use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{ClinicalConfig, CurveConfig, EvaluationConfig, ParallelConfig, ThresholdConfig};

#[derive(Parser, Debug)]
#[command(name = "sepsis-threshold")]
#[command(
    about = "Sepsis alert threshold performance and staffing optimizer",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a threshold and recommend thresholds for each policy
    Evaluate {
        #[command(flatten)]
        params: ParameterArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include the full threshold sweep in the report
        #[arg(long = "include-sweep")]
        include_sweep: bool,

        /// Disable colored output
        #[arg(long = "plain")]
        plain: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Print performance and workload at every threshold of the grid
    Sweep {
        #[command(flatten)]
        params: ParameterArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long = "plain")]
        plain: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize a configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Parameter overrides shared by `evaluate` and `sweep`.
///
/// Anything left unset comes from the config file, or the built-in default.
#[derive(Args, Debug, Clone, Default)]
pub struct ParameterArgs {
    /// Configuration file (defaults to discovering .sepsis-threshold.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of beds on the unit
    #[arg(long)]
    pub beds: Option<u32>,

    /// Average length of stay in days
    #[arg(long = "avg-stay")]
    pub avg_stay: Option<f64>,

    /// Clinician minutes spent per alert
    #[arg(long = "minutes-per-alert")]
    pub minutes_per_alert: Option<f64>,

    /// Staff hours per day available for alert response
    #[arg(long = "staff-hours")]
    pub staff_hours: Option<f64>,

    /// Threshold to evaluate, in [0, 1]
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Sepsis prevalence, strictly between 0 and 1
    #[arg(long)]
    pub prevalence: Option<f64>,

    #[arg(long = "sensitivity-exponent")]
    pub sensitivity_exponent: Option<f64>,

    #[arg(long = "specificity-exponent")]
    pub specificity_exponent: Option<f64>,

    #[arg(long = "alert-rate-exponent")]
    pub alert_rate_exponent: Option<f64>,

    /// Number of thresholds in the sweep grid
    #[arg(long = "grid-size")]
    pub grid_size: Option<usize>,

    /// Sensitivity floor for the resource-efficient policy
    #[arg(long = "min-sensitivity")]
    pub min_sensitivity: Option<f64>,

    /// Evaluate the sweep on a single thread
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,
}

impl ParameterArgs {
    /// Layer the command-line overrides on top of a loaded config.
    pub fn apply_to(&self, config: ThresholdConfig) -> ThresholdConfig {
        let mut clinical: ClinicalConfig = config.clinical();
        override_with(&mut clinical.bed_count, self.beds);
        override_with(&mut clinical.average_stay_days, self.avg_stay);
        override_with(&mut clinical.minutes_per_alert, self.minutes_per_alert);
        override_with(&mut clinical.available_staff_hours, self.staff_hours);

        let mut curve: CurveConfig = config.curve();
        override_with(&mut curve.sensitivity_exponent, self.sensitivity_exponent);
        override_with(&mut curve.specificity_exponent, self.specificity_exponent);
        override_with(&mut curve.alert_rate_exponent, self.alert_rate_exponent);

        let mut evaluation: EvaluationConfig = config.evaluation();
        override_with(&mut evaluation.prevalence, self.prevalence);
        override_with(&mut evaluation.threshold, self.threshold);
        override_with(&mut evaluation.grid_size, self.grid_size);
        override_with(&mut evaluation.min_sensitivity, self.min_sensitivity);

        let parallel = if self.no_parallel {
            ParallelConfig::sequential()
        } else {
            config.parallel()
        };

        ThresholdConfig {
            clinical: Some(clinical),
            curve: Some(curve),
            evaluation: Some(evaluation),
            parallel: Some(parallel),
        }
    }
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let cli = Cli::try_parse_from([
            "sepsis-threshold",
            "evaluate",
            "--beds",
            "40",
            "--staff-hours",
            "6.5",
            "--no-parallel",
        ])
        .unwrap();
        let Commands::Evaluate { params, .. } = cli.command else {
            panic!("expected evaluate");
        };

        let config = params.apply_to(ThresholdConfig::default());
        assert_eq!(config.clinical().bed_count, 40);
        assert_eq!(config.clinical().available_staff_hours, 6.5);
        assert_eq!(config.clinical().minutes_per_alert, 10.0);
        assert_eq!(config.evaluation().grid_size, 99);
        assert!(!config.parallel().enabled);
    }

    #[test]
    fn file_values_survive_without_overrides() {
        let file = ThresholdConfig {
            evaluation: Some(EvaluationConfig {
                prevalence: 0.2,
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = ParameterArgs::default().apply_to(file);
        assert_eq!(config.evaluation().prevalence, 0.2);
        assert!(config.parallel().enabled);
    }

    #[test]
    fn format_defaults_to_terminal() {
        let cli = Cli::try_parse_from(["sepsis-threshold", "sweep"]).unwrap();
        match cli.command {
            Commands::Sweep { format, .. } => assert_eq!(format, OutputFormat::Terminal),
            _ => panic!("expected sweep"),
        }
    }
}
