//! Threshold selection policies over a sweep.
//!
//! Every policy works on the feasible subset of one [`SweepResult`]: points
//! whose staffing requirement fits the setting's available hours. Candidates
//! are visited in ascending threshold order and only a strict improvement
//! replaces the incumbent, so ties resolve to the smallest threshold.
//!
//! An empty candidate set is a regular outcome, [`PolicyOutcome::Infeasible`],
//! tagged with the constraint that failed.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::core::refined::parse_probability;
use crate::core::{ClinicalSetting, WorkloadPoint};
use crate::errors::EngineResult;
use crate::sweep::SweepResult;

/// Default minimum sensitivity for the resource-efficient policy.
pub const DEFAULT_MIN_SENSITIVITY: f64 = 0.7;

/// Selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Highest sensitivity the staff can absorb.
    MaxSensitivity,
    /// Highest Youden's J the staff can absorb.
    BalancedYouden,
    /// Cheapest threshold that still meets the minimum sensitivity.
    ResourceEfficient,
}

impl Policy {
    pub const ALL: [Policy; 3] = [
        Policy::MaxSensitivity,
        Policy::BalancedYouden,
        Policy::ResourceEfficient,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::MaxSensitivity => "Maximum sensitivity",
            Self::BalancedYouden => "Balanced (Youden's J)",
            Self::ResourceEfficient => "Resource efficient",
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which constraint left a policy with no candidates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "constraint", rename_all = "snake_case")]
pub enum InfeasibilityReason {
    /// No grid point fits within the available staff hours.
    StaffingConstraint,
    /// Some points fit the staffing budget but none reaches the minimum sensitivity.
    MinimumSensitivity { min_sensitivity: f64 },
}

impl std::fmt::Display for InfeasibilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaffingConstraint => {
                write!(f, "no threshold satisfies staffing constraint")
            }
            Self::MinimumSensitivity { .. } => write!(
                f,
                "no threshold meets minimum sensitivity within staffing constraint"
            ),
        }
    }
}

/// A policy's chosen operating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub policy: Policy,
    pub threshold: f64,
    pub metrics: WorkloadPoint,
}

/// A policy that found no admissible threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InfeasibleResult {
    pub policy: Policy,
    pub reason: InfeasibilityReason,
}

/// Result of applying one policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PolicyOutcome {
    Recommended(Recommendation),
    Infeasible(InfeasibleResult),
}

impl PolicyOutcome {
    pub fn policy(&self) -> Policy {
        match self {
            Self::Recommended(r) => r.policy,
            Self::Infeasible(i) => i.policy,
        }
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        match self {
            Self::Recommended(r) => Some(r),
            Self::Infeasible(_) => None,
        }
    }

    pub fn infeasibility(&self) -> Option<InfeasibilityReason> {
        match self {
            Self::Recommended(_) => None,
            Self::Infeasible(i) => Some(i.reason),
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Recommended(_))
    }
}

/// Tunables for the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimizerConfig {
    min_sensitivity: f64,
}

impl OptimizerConfig {
    /// `min_sensitivity` must lie within `[0, 1]`.
    pub fn new(min_sensitivity: f64) -> EngineResult<Self> {
        Ok(Self {
            min_sensitivity: parse_probability("min_sensitivity", min_sensitivity)?,
        })
    }

    pub fn min_sensitivity(&self) -> f64 {
        self.min_sensitivity
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            min_sensitivity: DEFAULT_MIN_SENSITIVITY,
        }
    }
}

/// Outcomes of all three policies, computed from the same sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecommendationSet {
    pub max_sensitivity: PolicyOutcome,
    pub balanced_youden: PolicyOutcome,
    pub resource_efficient: PolicyOutcome,
}

impl RecommendationSet {
    pub fn get(&self, policy: Policy) -> &PolicyOutcome {
        match policy {
            Policy::MaxSensitivity => &self.max_sensitivity,
            Policy::BalancedYouden => &self.balanced_youden,
            Policy::ResourceEfficient => &self.resource_efficient,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PolicyOutcome> {
        Policy::ALL.into_iter().map(move |p| self.get(p))
    }
}

/// Pick the first point with the strictly greatest score.
fn select_max<'a, I, F>(candidates: I, score: F) -> Option<&'a WorkloadPoint>
where
    I: IntoIterator<Item = &'a WorkloadPoint>,
    F: Fn(&WorkloadPoint) -> f64,
{
    candidates
        .into_iter()
        .fold(None, |best: Option<(&WorkloadPoint, f64)>, p| {
            let s = score(p);
            match best {
                Some((_, best_score)) if s <= best_score => best,
                _ => Some((p, s)),
            }
        })
        .map(|(p, _)| p)
}

fn outcome(policy: Policy, chosen: Option<&WorkloadPoint>, reason: InfeasibilityReason) -> PolicyOutcome {
    match chosen {
        Some(point) => PolicyOutcome::Recommended(Recommendation {
            policy,
            threshold: point.threshold(),
            metrics: *point,
        }),
        None => PolicyOutcome::Infeasible(InfeasibleResult { policy, reason }),
    }
}

/// Highest sensitivity among feasible points.
pub fn max_sensitivity(sweep: &SweepResult, setting: &ClinicalSetting) -> PolicyOutcome {
    let chosen = select_max(
        sweep.feasible(setting.available_staff_hours()),
        WorkloadPoint::sensitivity,
    );
    outcome(
        Policy::MaxSensitivity,
        chosen,
        InfeasibilityReason::StaffingConstraint,
    )
}

/// Highest Youden's J among feasible points.
pub fn balanced_youden(sweep: &SweepResult, setting: &ClinicalSetting) -> PolicyOutcome {
    let chosen = select_max(
        sweep.feasible(setting.available_staff_hours()),
        WorkloadPoint::youden_j,
    );
    outcome(
        Policy::BalancedYouden,
        chosen,
        InfeasibilityReason::StaffingConstraint,
    )
}

/// Fewest staff hours among feasible points meeting `min_sensitivity`.
pub fn resource_efficient(
    sweep: &SweepResult,
    setting: &ClinicalSetting,
    config: &OptimizerConfig,
) -> PolicyOutcome {
    let available = setting.available_staff_hours();
    if sweep.feasible(available).next().is_none() {
        return outcome(
            Policy::ResourceEfficient,
            None,
            InfeasibilityReason::StaffingConstraint,
        );
    }

    let min_sensitivity = config.min_sensitivity();
    let chosen = select_max(
        sweep
            .feasible(available)
            .filter(|p| p.sensitivity() >= min_sensitivity),
        |p| -p.staff_hours_needed(),
    );
    outcome(
        Policy::ResourceEfficient,
        chosen,
        InfeasibilityReason::MinimumSensitivity { min_sensitivity },
    )
}

/// Apply every policy to the same sweep.
pub fn recommend(
    sweep: &SweepResult,
    setting: &ClinicalSetting,
    config: &OptimizerConfig,
) -> RecommendationSet {
    let _span = debug_span!("recommend", candidates = sweep.len()).entered();

    let set = RecommendationSet {
        max_sensitivity: max_sensitivity(sweep, setting),
        balanced_youden: balanced_youden(sweep, setting),
        resource_efficient: resource_efficient(sweep, setting, config),
    };

    for result in set.iter() {
        match result {
            PolicyOutcome::Recommended(r) => {
                debug!(policy = ?r.policy, threshold = r.threshold, "policy selected threshold")
            }
            PolicyOutcome::Infeasible(i) => {
                debug!(policy = ?i.policy, reason = %i.reason, "policy infeasible")
            }
        }
    }
    set
}
