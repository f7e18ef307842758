//! Platform-specific configuration paths

use crate::error::{CliError, CliResult};
use std::path::PathBuf;

/// Configuration paths for the license check CLI
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Base configuration directory
    pub config_dir: PathBuf,
    /// Path to config.json
    pub config_file: PathBuf,
}

impl ConfigPaths {
    /// Get configuration paths for the current platform
    ///
    /// Paths:
    /// - Linux: ~/.config/sf-license-check/
    /// - macOS: ~/Library/Application Support/sf-license-check/
    /// - Windows: %APPDATA%\sf-license-check\
    pub fn new() -> CliResult<Self> {
        let config_dir = Self::get_config_dir()?;

        Ok(Self {
            config_file: config_dir.join("config.json"),
            config_dir,
        })
    }

    /// Get the configuration directory, respecting SF_LICENSE_CHECK_CONFIG_DIR env var
    fn get_config_dir() -> CliResult<PathBuf> {
        if let Ok(dir) = std::env::var("SF_LICENSE_CHECK_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let base_dir = dirs::config_dir().ok_or_else(|| {
            CliError::Config("Could not determine configuration directory".to_string())
        })?;

        Ok(base_dir.join("sf-license-check"))
    }

    /// Ensure the configuration directory exists
    pub fn ensure_dir_exists(&self) -> CliResult<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }
}
