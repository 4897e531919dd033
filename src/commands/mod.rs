//! CLI command implementations.
//!
//! - **evaluate**: current-threshold metrics, staffing status and per-policy
//!   recommendations
//! - **sweep**: the full threshold table only
//! - **init**: write a default `.sepsis-threshold.toml`

pub mod evaluate;
pub mod init;
pub mod sweep;

pub use evaluate::{handle_evaluate, EvaluateConfig};
pub use init::init_config;
pub use sweep::{handle_sweep, SweepConfig};

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::cli::ParameterArgs;
use crate::config::{build_request, load_config};
use crate::engine::EvaluationRequest;

/// Load the config file, layer the flags over it and validate the result.
pub(crate) fn resolve_request(params: &ParameterArgs) -> Result<EvaluationRequest> {
    let file_config = load_config(params.config.as_deref()).context("Failed to load configuration")?;
    let config = params.apply_to(file_config);
    let request = build_request(&config).context("Invalid parameters")?;
    if !request.shape.is_conventional() {
        log::warn!(
            "Curve exponents {:?} fall outside the usual 0.1 - 2.0 range",
            request.shape
        );
    }
    log::debug!("Resolved request: {request:?}");
    Ok(request)
}

/// Open the report destination: the given file, or stdout.
pub(crate) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
