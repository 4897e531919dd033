//! Evaluation of every candidate threshold on an evenly spaced grid.
//!
//! Grid points are independent, so the map runs on rayon's pool when the grid
//! is large enough. Indexed parallel collection keeps ascending threshold order,
//! which the optimizer's tie-break rules depend on.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, debug_span};

use crate::config::ParallelConfig;
use crate::core::refined::parse_grid_size;
use crate::core::{ClinicalSetting, CurveShape, WorkloadPoint};
use crate::curve::{CurveModel, PowerLawCurve};
use crate::errors::EngineResult;
use crate::metrics::adjust_for_prevalence;
use crate::workload::with_workload;

/// Default number of grid points: 0.01, 0.02, ..., 0.99.
pub const DEFAULT_GRID_SIZE: usize = 99;

/// Upper bound on grid size. Larger requests fail instead of being truncated.
pub const MAX_GRID_SIZE: usize = 100_000;

/// Ascending thresholds `i / (n + 1)` for `i = 1..=n`, all strictly inside `(0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdGrid {
    thresholds: Vec<f64>,
}

impl ThresholdGrid {
    pub fn new(grid_size: usize) -> EngineResult<Self> {
        Ok(Self::evenly_spaced(parse_grid_size(grid_size)?))
    }

    fn evenly_spaced(grid_size: usize) -> Self {
        let denominator = (grid_size + 1) as f64;
        Self {
            thresholds: (1..=grid_size).map(|i| i as f64 / denominator).collect(),
        }
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

impl Default for ThresholdGrid {
    fn default() -> Self {
        Self::evenly_spaced(DEFAULT_GRID_SIZE)
    }
}

/// Workload points in ascending threshold order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SweepResult {
    points: Vec<WorkloadPoint>,
}

impl SweepResult {
    pub fn points(&self) -> &[WorkloadPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkloadPoint> {
        self.points.iter()
    }

    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(WorkloadPoint::threshold)
    }

    /// Points whose staffing requirement fits within `available_hours`.
    pub fn feasible(&self, available_hours: f64) -> impl Iterator<Item = &WorkloadPoint> {
        self.points
            .iter()
            .filter(move |p| p.is_feasible(available_hours))
    }

    /// Grid point closest to `threshold`; the lower one wins an exact tie.
    pub fn point_nearest(&self, threshold: f64) -> Option<&WorkloadPoint> {
        self.points.iter().fold(None, |best: Option<&WorkloadPoint>, p| match best {
            Some(b) if (b.threshold() - threshold).abs() <= (p.threshold() - threshold).abs() => {
                Some(b)
            }
            _ => Some(p),
        })
    }
}

impl<'a> IntoIterator for &'a SweepResult {
    type Item = &'a WorkloadPoint;
    type IntoIter = std::slice::Iter<'a, WorkloadPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Full metrics for a single threshold.
pub fn evaluate_point(
    curve: &dyn CurveModel,
    setting: &ClinicalSetting,
    prevalence: f64,
    threshold: f64,
) -> EngineResult<WorkloadPoint> {
    let performance = curve.evaluate(threshold)?;
    let adjusted = adjust_for_prevalence(performance, prevalence)?;
    with_workload(adjusted, setting)
}

/// Sweep the reference power-law curve over `grid_size` evenly spaced thresholds.
///
/// # Example
///
/// ```rust
/// use sepsis_threshold::core::{ClinicalSetting, CurveShape};
/// use sepsis_threshold::sweep::sweep;
///
/// let result = sweep(&CurveShape::default(), &ClinicalSetting::default(), 0.1, 99).unwrap();
/// assert_eq!(result.len(), 99);
/// assert!((result.points()[0].threshold() - 0.01).abs() < 1e-12);
/// ```
pub fn sweep(
    shape: &CurveShape,
    setting: &ClinicalSetting,
    prevalence: f64,
    grid_size: usize,
) -> EngineResult<SweepResult> {
    let grid = ThresholdGrid::new(grid_size)?;
    sweep_curve(
        &PowerLawCurve::new(*shape),
        setting,
        prevalence,
        &grid,
        &ParallelConfig::default(),
    )
}

/// Sweep an arbitrary curve over a grid.
///
/// Fails with the first invalid input encountered; no partial result is
/// returned. Undefined predictive values are not errors and stay on their
/// points as `None`.
pub fn sweep_curve(
    curve: &dyn CurveModel,
    setting: &ClinicalSetting,
    prevalence: f64,
    grid: &ThresholdGrid,
    parallel: &ParallelConfig,
) -> EngineResult<SweepResult> {
    let _span = debug_span!("sweep", grid_size = grid.len()).entered();

    let use_parallel = parallel.should_parallelize(grid.len());
    let points = if use_parallel {
        grid.thresholds()
            .par_iter()
            .map(|&t| evaluate_point(curve, setting, prevalence, t))
            .collect::<EngineResult<Vec<_>>>()?
    } else {
        grid.thresholds()
            .iter()
            .map(|&t| evaluate_point(curve, setting, prevalence, t))
            .collect::<EngineResult<Vec<_>>>()?
    };

    debug!(
        points = points.len(),
        parallel = use_parallel,
        "threshold sweep complete"
    );
    Ok(SweepResult { points })
}
