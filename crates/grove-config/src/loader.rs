//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::global::GlobalConfig;
use crate::project::{validate_date_pattern, ConsoleConfig, FormattingConfig, ProjectConfig};
use crate::{ConfigResult, DEFAULT_DATE_PATTERN, PROJECT_CONFIG_FILE};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.grove/config.toml) - lowest priority
/// 2. Project config (./grove.toml) - overrides global
/// 3. Environment variables (GROVE_*) - overrides project
pub struct ConfigLoader {
    /// Global config path override (tests point this at a temp dir)
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Global configuration
    pub global: GlobalConfig,

    /// Project root directory (where grove.toml was found)
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use a specific file as the global configuration
    pub fn with_global_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find grove.toml, then loads and merges
    /// global config if it exists.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;
        let global_config = self.load_global_config()?;
        let project_config = self.apply_env_overrides(project_config)?;

        Ok(Config {
            project: project_config,
            global: global_config,
            project_root,
        })
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = ProjectConfig::load_from_file(config_path)?;
        let global_config = self.load_global_config()?;
        let project_config = self.apply_env_overrides(project_config)?;

        let project_root = config_path.parent().map(|p| p.to_path_buf());

        Ok(Config {
            project: project_config,
            global: global_config,
            project_root,
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, ProjectConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(PROJECT_CONFIG_FILE);

            if config_path.exists() {
                let project_config = ProjectConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, ProjectConfig::default())),
            }
        }
    }

    /// Load global configuration; a missing file yields defaults
    fn load_global_config(&mut self) -> ConfigResult<GlobalConfig> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => match GlobalConfig::global_config_path() {
                Ok(path) => {
                    self.global_config_path = Some(path.clone());
                    path
                }
                // No home directory means no global config
                Err(_) => return Ok(GlobalConfig::default()),
            },
        };

        if !path.exists() {
            return Ok(GlobalConfig::default());
        }

        GlobalConfig::load_from_file(&path)
    }

    /// Apply environment variable overrides to project config
    ///
    /// Environment variables follow the pattern: GROVE_<SECTION>_<KEY>
    /// Example: GROVE_CONSOLE_OUTPUT=false
    fn apply_env_overrides(&self, mut config: ProjectConfig) -> ConfigResult<ProjectConfig> {
        if let Ok(output) = env::var("GROVE_CONSOLE_OUTPUT") {
            config
                .console
                .get_or_insert_with(ConsoleConfig::default)
                .output = Some(parse_bool(&output));
        }

        if let Ok(info) = env::var("GROVE_CONSOLE_INFO") {
            config.console.get_or_insert_with(ConsoleConfig::default).info =
                Some(parse_bool(&info));
        }

        if let Ok(pattern) = env::var("GROVE_DATE_PATTERN") {
            validate_date_pattern("GROVE_DATE_PATTERN", &pattern)?;
            config
                .formatting
                .get_or_insert_with(FormattingConfig::default)
                .date_pattern = Some(pattern);
        }

        Ok(config)
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.to_lowercase().as_str(), "true" | "1" | "yes")
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Effective console capture flag (project > global > true)
    pub fn console_output(&self) -> bool {
        self.project
            .console_output()
            .or_else(|| self.global.console_output())
            .unwrap_or(true)
    }

    /// Effective console logging flag (project > global > false)
    pub fn console_info(&self) -> bool {
        self.project
            .console_info()
            .or_else(|| self.global.console_info())
            .unwrap_or(false)
    }

    /// Effective default date pattern
    pub fn date_pattern(&self) -> &str {
        self.project
            .date_pattern()
            .or_else(|| self.global.date_pattern())
            .unwrap_or(DEFAULT_DATE_PATTERN)
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if this is a project (has grove.toml)
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}
