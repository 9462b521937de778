//! Cross-platform directory path resolution
//!
//! Resolves the configuration directory, honoring an environment
//! override first so tests and containers can pin the location.

use std::path::PathBuf;

/// Get the configuration directory path
///
/// Checks TOPOGRAPH_CONFIG_DIR first, then falls back to:
/// - Unix (Linux/macOS): XDG_CONFIG_HOME/topograph or ~/.config/topograph
/// - Windows: %APPDATA%\topograph
pub fn config_dir() -> PathBuf {
    std::env::var("TOPOGRAPH_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            #[cfg(windows)]
            {
                use directories::ProjectDirs;
                ProjectDirs::from("", "", "topograph")
                    .map(|dirs| dirs.config_dir().to_path_buf())
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join("topograph"))
            }
            #[cfg(not(windows))]
            {
                use directories::BaseDirs;
                std::env::var("XDG_CONFIG_HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| {
                        BaseDirs::new()
                            .map(|dirs| dirs.home_dir().join(".config"))
                            .unwrap_or_else(|| PathBuf::from(".").join(".config"))
                    })
                    .join("topograph")
            }
        })
}

/// Default configuration file location.
pub fn config_file() -> PathBuf {
    config_dir().join("config.yaml")
}
