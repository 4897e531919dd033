use std::fs;
use std::path::{Path, PathBuf};

use super::core::ThresholdConfig;
use crate::errors::ConfigError;

/// File name searched for in the current directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".sepsis-threshold.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse config from a TOML string
pub fn parse_config(contents: &str, path: &Path) -> Result<ThresholdConfig, ConfigError> {
    toml::from_str::<ThresholdConfig>(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load an explicitly requested config file. Any failure is an error.
pub fn load_config_from_path(path: &Path) -> Result<ThresholdConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&contents, path)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try a discovered config file, logging and skipping unreadable ones.
fn try_load_discovered(path: &Path) -> Option<ThresholdConfig> {
    match load_config_from_path(path) {
        Ok(config) => Some(config),
        Err(ConfigError::Read { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            None
        }
        Err(e) => {
            log::warn!("{e}. Using defaults.");
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file.
pub fn discover_config(start: PathBuf) -> Option<(PathBuf, ThresholdConfig)> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_discovered(&path).map(|config| (path, config)))
}

/// Resolve the effective file config.
///
/// An explicit path must load. Otherwise the directory hierarchy is searched,
/// falling back to defaults when nothing usable is found.
pub fn load_config(explicit: Option<&Path>) -> Result<ThresholdConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("Failed to get current directory: {e}. Using default config.");
            return Ok(ThresholdConfig::default());
        }
    };

    Ok(discover_config(current)
        .map(|(_, config)| config)
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {MAX_TRAVERSAL_DEPTH} directories. Using default config."
            );
            ThresholdConfig::default()
        }))
}
