//! Core value types shared by every stage of an evaluation.

pub mod points;
pub mod refined;
pub mod setting;

pub use points::{
    PerformancePoint, PredictiveValues, PrevalenceAdjustedPoint, Workload, WorkloadPoint,
};
pub use setting::{ClinicalSetting, CurveShape};
