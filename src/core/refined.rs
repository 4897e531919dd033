//! Refined numeric domains for evaluation inputs.
//!
//! Every bounded input (probabilities, prevalence, clinical quantities, grid
//! size) is checked through one of the predicates below. Constructors call the
//! `parse_*` helpers, which run the predicate and name the offending parameter
//! in the resulting [`EngineError`].
//!
//! # Example
//!
//! ```rust
//! use sepsis_threshold::core::refined::{Probability, Prevalence};
//!
//! assert!(Probability::new(1.0).is_ok());
//! assert!(Prevalence::new(1.0).is_err());
//! ```

use stillwater::refined::{Predicate, Refined};

use crate::errors::{EngineError, EngineResult};
use crate::sweep::MAX_GRID_SIZE;

// ============================================================================
// Predicates
// ============================================================================

/// Finite value in the closed unit interval `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitInterval;

impl Predicate<f64> for UnitInterval {
    type Error = &'static str;

    fn check(value: &f64) -> Result<(), Self::Error> {
        if (0.0..=1.0).contains(value) {
            Ok(())
        } else {
            Err("must lie within [0, 1]")
        }
    }
}

/// Finite value in the open unit interval `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenUnitInterval;

impl Predicate<f64> for OpenUnitInterval {
    type Error = &'static str;

    fn check(value: &f64) -> Result<(), Self::Error> {
        if *value > 0.0 && *value < 1.0 {
            Ok(())
        } else {
            Err("must be strictly between 0 and 1")
        }
    }
}

/// Finite value strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveFinite;

impl Predicate<f64> for PositiveFinite {
    type Error = &'static str;

    fn check(value: &f64) -> Result<(), Self::Error> {
        if value.is_finite() && *value > 0.0 {
            Ok(())
        } else {
            Err("must be a finite value greater than 0")
        }
    }
}

/// Count of at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonZeroCount;

impl Predicate<u32> for NonZeroCount {
    type Error = &'static str;

    fn check(value: &u32) -> Result<(), Self::Error> {
        if *value > 0 {
            Ok(())
        } else {
            Err("must be a positive integer")
        }
    }
}

/// Number of grid points, `1..=MAX_GRID_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSizeRange;

impl Predicate<usize> for GridSizeRange {
    type Error = &'static str;

    fn check(value: &usize) -> Result<(), Self::Error> {
        if (1..=MAX_GRID_SIZE).contains(value) {
            Ok(())
        } else {
            Err("must be between 1 and 100000")
        }
    }
}

// ============================================================================
// Refined types
// ============================================================================

/// Threshold, sensitivity, specificity or alert rate.
pub type Probability = Refined<f64, UnitInterval>;

/// Pre-test probability of sepsis.
pub type Prevalence = Refined<f64, OpenUnitInterval>;

/// Stay length, minutes per alert, staff hours, curve exponents.
pub type PositiveQuantity = Refined<f64, PositiveFinite>;

pub type BedCount = Refined<u32, NonZeroCount>;

pub type GridSize = Refined<usize, GridSizeRange>;

// ============================================================================
// Parsing helpers
// ============================================================================

fn parse<T, P>(parameter: &'static str, value: T, reported: f64) -> EngineResult<T>
where
    P: Predicate<T, Error = &'static str>,
{
    Refined::<T, P>::new(value)
        .map(Refined::into_inner)
        .map_err(|reason| EngineError::invalid(parameter, reported, reason))
}

/// Parse a value that must lie within `[0, 1]`.
pub fn parse_probability(parameter: &'static str, value: f64) -> EngineResult<f64> {
    parse::<f64, UnitInterval>(parameter, value, value)
}

/// Parse a prevalence, which must lie strictly inside `(0, 1)`.
pub fn parse_prevalence(parameter: &'static str, value: f64) -> EngineResult<f64> {
    parse::<f64, OpenUnitInterval>(parameter, value, value)
}

/// Parse a finite, strictly positive quantity.
pub fn parse_positive(parameter: &'static str, value: f64) -> EngineResult<f64> {
    parse::<f64, PositiveFinite>(parameter, value, value)
}

pub fn parse_bed_count(value: u32) -> EngineResult<u32> {
    parse::<u32, NonZeroCount>("bed_count", value, f64::from(value))
}

pub fn parse_grid_size(value: usize) -> EngineResult<usize> {
    parse::<usize, GridSizeRange>("grid_size", value, value as f64)
}
