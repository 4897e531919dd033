// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod curve;
pub mod engine;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod metrics;
pub mod observability;
pub mod optimizer;
pub mod sweep;
pub mod workload;

// Re-export commonly used types
pub use crate::core::{
    ClinicalSetting, CurveShape, PerformancePoint, PredictiveValues, PrevalenceAdjustedPoint,
    Workload, WorkloadPoint,
};

pub use crate::curve::{CurveModel, PowerLawCurve, TabulatedCurve};

pub use crate::engine::{evaluate, evaluate_with, Evaluation, EvaluationRequest};

pub use crate::errors::{ConfigError, EngineError, EngineResult, ErrorCode};

pub use crate::optimizer::{
    InfeasibilityReason, OptimizerConfig, Policy, PolicyOutcome, Recommendation,
    RecommendationSet,
};

pub use crate::sweep::{SweepResult, ThresholdGrid};

pub use crate::workload::StaffingStatus;

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
