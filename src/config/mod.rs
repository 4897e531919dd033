//! Configuration file schema, discovery and validation.

mod core;
pub mod loader;
mod parallel;
pub mod validation;

pub use self::core::{
    ClinicalConfig, CurveConfig, EvaluationConfig, ThresholdConfig, DEFAULT_CONFIG_TOML,
};
pub use loader::{load_config, load_config_from_path, CONFIG_FILE_NAME};
pub use parallel::ParallelConfig;
pub use validation::{build_request, validate_config, ConfigValidation};
