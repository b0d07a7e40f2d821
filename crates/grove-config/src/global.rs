//! Global Configuration (~/.grove/config.toml)
//!
//! Handles user-level defaults stored in `~/.grove/config.toml`.

use crate::project::{validate_date_pattern, ConsoleConfig, FormattingConfig};
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global user configuration from ~/.grove/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Console defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console: Option<ConsoleConfig>,

    /// Formatting defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<FormattingConfig>,
}

impl GlobalConfig {
    /// Load global configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the global configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(pattern) = self.date_pattern() {
            validate_date_pattern("formatting.date_pattern", pattern)?;
        }
        Ok(())
    }

    /// Get the global config file path (~/.grove/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".grove").join("config.toml"))
    }

    pub fn console_output(&self) -> Option<bool> {
        self.console.as_ref().and_then(|c| c.output)
    }

    pub fn console_info(&self) -> Option<bool> {
        self.console.as_ref().and_then(|c| c.info)
    }

    pub fn date_pattern(&self) -> Option<&str> {
        self.formatting
            .as_ref()
            .and_then(|f| f.date_pattern.as_deref())
    }

    /// Merge another global config into this one
    /// Other config takes precedence for non-None values
    pub fn merge(&mut self, other: &GlobalConfig) {
        if other.console.is_some() {
            self.console = other.console.clone();
        }
        if other.formatting.is_some() {
            self.formatting = other.formatting.clone();
        }
    }
}
