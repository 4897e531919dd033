//! Parallelism configuration for threshold sweeps.

use serde::{Deserialize, Serialize};

/// Default value for parallel processing enabled
fn default_enabled() -> bool {
    true
}

/// Grids smaller than this are swept on the calling thread
fn default_min_grid_size() -> usize {
    1024
}

/// Configuration for parallel sweep evaluation.
///
/// When enabled and the grid has at least `min_grid_size` points, grid points
/// are evaluated on rayon's thread pool. The default 99 point grid is small
/// enough that the sequential path wins.
///
/// # Example
///
/// ```rust
/// use sepsis_threshold::config::ParallelConfig;
///
/// let config = ParallelConfig::default();
/// assert!(!config.should_parallelize(99));
/// assert!(config.should_parallelize(10_000));
/// assert!(!ParallelConfig::sequential().should_parallelize(10_000));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Enable parallel processing (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Minimum grid size before the sweep goes parallel (default: 1024)
    #[serde(default = "default_min_grid_size")]
    pub min_grid_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            min_grid_size: default_min_grid_size(),
        }
    }
}

impl ParallelConfig {
    /// Create a config with parallel processing disabled.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn should_parallelize(&self, grid_size: usize) -> bool {
        self.enabled && grid_size >= self.min_grid_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let config: ParallelConfig = toml::from_str("").unwrap();
        assert_eq!(config, ParallelConfig::default());

        let config: ParallelConfig = toml::from_str("enabled = false").unwrap();
        assert!(!config.enabled);
        assert_eq!(config.min_grid_size, 1024);
    }

    #[test]
    fn threshold_is_inclusive() {
        let config = ParallelConfig {
            enabled: true,
            min_grid_size: 50,
        };
        assert!(config.should_parallelize(50));
        assert!(!config.should_parallelize(49));
    }
}
