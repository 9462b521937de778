//! Configuration loading
//!
//! Loads the YAML configuration file, falling back to compiled
//! defaults when no file exists. The file location can be overridden
//! with TOPOGRAPH_CONFIG.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::paths;
use super::schema::Config;

/// Resolve the configuration file path: explicit argument first, then
/// the TOPOGRAPH_CONFIG environment variable, then the platform
/// default.
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    std::env::var("TOPOGRAPH_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| paths::config_file())
}

/// Load configuration, tolerating a missing file.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = resolve_path(explicit);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    load_from(&path)
}

/// Load configuration from a specific file.
pub fn load_from(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}
