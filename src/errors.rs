//! Error types for threshold evaluation.
//!
//! The engine reports two kinds of failure:
//!
//! - [`EngineError::InvalidParameter`]: an input is outside its admissible
//!   domain (non-positive clinical setting field, prevalence outside `(0, 1)`,
//!   threshold outside `[0, 1]`, non-positive exponent, bad grid size).
//! - [`EngineError::UndefinedMetric`]: inputs are individually valid but a
//!   predictive value has a zero denominator.
//!
//! Staffing infeasibility is *not* an error; it is a regular optimizer outcome
//! (see [`crate::optimizer::InfeasibleResult`]).
//!
//! # Error Codes
//!
//! - E001: invalid parameter
//! - E002: undefined metric
//! - E010-E019: configuration errors (see [`ConfigError`])
//!
//! # Example
//!
//! ```rust
//! use sepsis_threshold::errors::{EngineError, ErrorCode};
//!
//! let err = EngineError::invalid("prevalence", 1.0, "must be strictly between 0 and 1");
//! assert_eq!(err.code(), ErrorCode::INVALID_PARAMETER);
//! assert!(err.is_user_fixable());
//! ```

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// Input outside its admissible domain
    pub const INVALID_PARAMETER: ErrorCode = ErrorCode("E001");
    /// Predictive value denominator is zero
    pub const UNDEFINED_METRIC: ErrorCode = ErrorCode("E002");

    /// Config error - file could not be read
    pub const CONFIG_READ: ErrorCode = ErrorCode("E010");
    /// Config error - TOML could not be parsed
    pub const CONFIG_PARSE: ErrorCode = ErrorCode("E011");
    /// Config error - one or more values invalid
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E012");

    /// Get the error code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Predictive value that could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredictiveMetric {
    Ppv,
    Npv,
}

impl std::fmt::Display for PredictiveMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ppv => write!(f, "PPV"),
            Self::Npv => write!(f, "NPV"),
        }
    }
}

/// Errors raised by the evaluation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// An input value is outside its admissible domain.
    #[error("Invalid parameter `{parameter}` = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: String,
    },

    /// A predictive value has a zero denominator for this input combination.
    #[error(
        "{metric} is undefined for sensitivity={sensitivity}, specificity={specificity}, prevalence={prevalence}"
    )]
    UndefinedMetric {
        metric: PredictiveMetric,
        sensitivity: f64,
        specificity: f64,
        prevalence: f64,
    },
}

impl EngineError {
    /// Create an invalid parameter error.
    pub fn invalid(parameter: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            value,
            reason: reason.into(),
        }
    }

    /// Get the error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidParameter { .. } => ErrorCode::INVALID_PARAMETER,
            Self::UndefinedMetric { .. } => ErrorCode::UNDEFINED_METRIC,
        }
    }

    /// Whether the caller can fix this by changing a single input.
    ///
    /// An undefined metric arises from a joint combination of valid inputs,
    /// so there is no single parameter to point at.
    #[must_use]
    pub fn is_user_fixable(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Deterministic inputs never succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while loading or validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for the config schema.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// One or more values failed validation. Every problem is listed.
    #[error("Invalid configuration ({} problem(s)):\n  - {}", .problems.len(), .problems.join("\n  - "))]
    Invalid { problems: Vec<String> },
}

impl ConfigError {
    /// Get the error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::CONFIG_READ,
            Self::Parse { .. } => ErrorCode::CONFIG_PARSE,
            Self::Invalid { .. } => ErrorCode::CONFIG_INVALID,
        }
    }
}
