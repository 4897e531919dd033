use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use super::{open_output, resolve_request};
use crate::cli::{self, ParameterArgs};
use crate::engine::evaluate;
use crate::formatting::FormattingConfig;
use crate::io::output::{create_writer, EvaluationReport};

pub struct EvaluateConfig {
    pub params: ParameterArgs,
    pub format: cli::OutputFormat,
    pub output: Option<PathBuf>,
    pub include_sweep: bool,
    pub plain: bool,
}

pub fn handle_evaluate(config: EvaluateConfig) -> Result<()> {
    let request = resolve_request(&config.params)?;
    let evaluation = evaluate(&request).context("Evaluation failed")?;
    info!(
        threshold = request.threshold,
        feasible = evaluation.staffing.is_feasible(),
        "Evaluated current threshold"
    );

    let formatting = if config.plain || config.output.is_some() {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    };
    let out = open_output(config.output.as_deref())?;
    let mut writer = create_writer(config.format.into(), out, formatting);
    writer.write_evaluation(&EvaluationReport::new(
        &request,
        &evaluation,
        config.include_sweep,
    ))?;
    writer.finish().context("Failed to write report")?;

    if let Some(path) = &config.output {
        eprintln!("Report written to {}", path.display());
    }
    Ok(())
}
