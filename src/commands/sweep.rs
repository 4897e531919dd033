use anyhow::{Context, Result};
use std::path::PathBuf;

use super::{open_output, resolve_request};
use crate::cli::{self, ParameterArgs};
use crate::curve::PowerLawCurve;
use crate::formatting::FormattingConfig;
use crate::io::output::create_writer;
use crate::sweep::{sweep_curve, ThresholdGrid};

pub struct SweepConfig {
    pub params: ParameterArgs,
    pub format: cli::OutputFormat,
    pub output: Option<PathBuf>,
    pub plain: bool,
}

pub fn handle_sweep(config: SweepConfig) -> Result<()> {
    let request = resolve_request(&config.params)?;
    let grid = ThresholdGrid::new(request.grid_size).context("Invalid grid size")?;
    let sweep = sweep_curve(
        &PowerLawCurve::new(request.shape),
        &request.setting,
        request.prevalence,
        &grid,
        &request.parallel,
    )
    .context("Sweep failed")?;

    let formatting = if config.plain || config.output.is_some() {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    };
    let out = open_output(config.output.as_deref())?;
    let mut writer = create_writer(config.format.into(), out, formatting);
    writer.write_sweep(&sweep)?;
    writer.finish().context("Failed to write sweep")?;

    if let Some(path) = &config.output {
        eprintln!("Sweep written to {}", path.display());
    }
    Ok(())
}
