use serde::Serialize;
use std::io::Write;

use super::writers::{JsonWriter, MarkdownWriter, TerminalWriter};
use crate::core::WorkloadPoint;
use crate::engine::{Evaluation, EvaluationRequest};
use crate::optimizer::RecommendationSet;
use crate::sweep::SweepResult;
use crate::workload::StaffingStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// What a report shows: the request that produced it, the current point,
/// staffing, recommendations and optionally the full sweep table.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport<'a> {
    pub version: &'static str,
    pub request: &'a EvaluationRequest,
    pub current: &'a WorkloadPoint,
    pub staffing: &'a StaffingStatus,
    pub recommendations: &'a RecommendationSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<&'a SweepResult>,
}

impl<'a> EvaluationReport<'a> {
    pub fn new(
        request: &'a EvaluationRequest,
        evaluation: &'a Evaluation,
        include_sweep: bool,
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            request,
            current: &evaluation.current,
            staffing: &evaluation.staffing,
            recommendations: &evaluation.recommendations,
            sweep: include_sweep.then_some(&evaluation.sweep),
        }
    }
}

pub trait OutputWriter {
    fn write_evaluation(&mut self, report: &EvaluationReport<'_>) -> anyhow::Result<()>;
    fn write_sweep(&mut self, sweep: &SweepResult) -> anyhow::Result<()>;
    /// Flush buffered output. A report is only complete once this succeeds.
    fn finish(&mut self) -> anyhow::Result<()>;
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
    formatting: crate::formatting::FormattingConfig,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}
