//! Project Configuration (grove.toml)
//!
//! Handles project-level configuration stored in `grove.toml` at the project root.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project configuration from grove.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Console capture settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console: Option<ConsoleConfig>,

    /// Formatting defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<FormattingConfig>,
}

/// Console capture settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Capture printed output into the console buffer (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<bool>,

    /// Echo printed output through the log (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<bool>,
}

/// Formatting defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct FormattingConfig {
    /// Pattern used when a date is rendered without an explicit pattern
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_pattern: Option<String>,
}

impl ProjectConfig {
    /// Load project configuration from a file
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

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(pattern) = self.date_pattern() {
            validate_date_pattern("formatting.date_pattern", pattern)?;
        }
        Ok(())
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
}

/// Date patterns must be non-empty and have balanced literal quotes
pub(crate) fn validate_date_pattern(field: &str, pattern: &str) -> ConfigResult<()> {
    if pattern.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "date pattern must not be empty".to_string(),
        });
    }
    if pattern.chars().filter(|c| *c == '\'').count() % 2 != 0 {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("unterminated quoted literal in '{}'", pattern),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: ProjectConfig = toml::from_str("").unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[console]
output = false
info = true

[formatting]
date_pattern = "dd/MM/yyyy"
"#;

        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.console_output(), Some(false));
        assert_eq!(config.console_info(), Some(true));
        assert_eq!(config.date_pattern(), Some("dd/MM/yyyy"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml = r#"
[console]
colour = true
"#;
        let result: Result<ProjectConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_date_pattern_invalid() {
        let config = ProjectConfig {
            formatting: Some(FormattingConfig {
                date_pattern: Some("  ".to_string()),
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unbalanced_quote_invalid() {
        let config = ProjectConfig {
            formatting: Some(FormattingConfig {
                date_pattern: Some("yyyy'T".to_string()),
            }),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
