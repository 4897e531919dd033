//! Single evaluation entry point.
//!
//! One request produces exactly one sweep. The current-threshold metrics,
//! the exported table and all three policies read from that same sweep
//! (the current threshold is evaluated directly, since it need not be a grid point).

use serde::Serialize;
use tracing::{debug, info_span};

use crate::config::ParallelConfig;
use crate::core::{ClinicalSetting, CurveShape, WorkloadPoint};
use crate::curve::{CurveModel, PowerLawCurve};
use crate::core::refined::{parse_prevalence, parse_probability};
use crate::errors::EngineResult;
use crate::optimizer::{recommend, OptimizerConfig, RecommendationSet};
use crate::sweep::{evaluate_point, sweep_curve, SweepResult, ThresholdGrid, DEFAULT_GRID_SIZE};
use crate::workload::StaffingStatus;

/// Fully specified input for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationRequest {
    pub setting: ClinicalSetting,
    pub shape: CurveShape,
    pub prevalence: f64,
    pub threshold: f64,
    pub grid_size: usize,
    pub optimizer: OptimizerConfig,
    #[serde(skip)]
    pub parallel: ParallelConfig,
}

impl Default for EvaluationRequest {
    fn default() -> Self {
        Self {
            setting: ClinicalSetting::default(),
            shape: CurveShape::default(),
            prevalence: 0.1,
            threshold: 0.5,
            grid_size: DEFAULT_GRID_SIZE,
            optimizer: OptimizerConfig::default(),
            parallel: ParallelConfig::default(),
        }
    }
}

/// Everything the presentation layer needs from one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub current: WorkloadPoint,
    pub staffing: StaffingStatus,
    pub sweep: SweepResult,
    pub recommendations: RecommendationSet,
}

/// Evaluate a request against the reference power-law curve.
///
/// # Example
///
/// ```rust
/// use sepsis_threshold::engine::{evaluate, EvaluationRequest};
///
/// let evaluation = evaluate(&EvaluationRequest::default()).unwrap();
/// assert_eq!(evaluation.sweep.len(), 99);
/// assert!(evaluation.staffing.is_feasible());
/// ```
pub fn evaluate(request: &EvaluationRequest) -> EngineResult<Evaluation> {
    evaluate_with(&PowerLawCurve::new(request.shape), request)
}

/// Evaluate a request against any curve. `request.shape` is ignored.
pub fn evaluate_with(
    curve: &dyn CurveModel,
    request: &EvaluationRequest,
) -> EngineResult<Evaluation> {
    let _span = info_span!(
        "evaluate",
        threshold = request.threshold,
        grid_size = request.grid_size
    )
    .entered();

    // Reject bad scalar inputs before any work is done.
    let threshold = parse_probability("threshold", request.threshold)?;
    let prevalence = parse_prevalence("prevalence", request.prevalence)?;
    let grid = ThresholdGrid::new(request.grid_size)?;

    let current = evaluate_point(curve, &request.setting, prevalence, threshold)?;
    let staffing = StaffingStatus::assess(current.staff_hours_needed(), &request.setting);

    let sweep = sweep_curve(curve, &request.setting, prevalence, &grid, &request.parallel)?;
    let recommendations = recommend(&sweep, &request.setting, &request.optimizer);

    debug!(
        staff_hours_needed = current.staff_hours_needed(),
        feasible = staffing.is_feasible(),
        "evaluation complete"
    );

    Ok(Evaluation {
        current,
        staffing,
        sweep,
        recommendations,
    })
}
