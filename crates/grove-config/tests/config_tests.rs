//! Configuration loading and precedence tests

use grove_config::{ConfigError, ConfigLoader, ProjectConfig, PROJECT_CONFIG_FILE};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_config_file(dir: &Path, content: &str) -> PathBuf {
    let config_path = dir.join(PROJECT_CONFIG_FILE);
    fs::write(&config_path, content).unwrap();
    config_path
}

fn write_global(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("global.toml");
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
#[serial]
fn test_project_overrides_global() {
    let temp_dir = TempDir::new().unwrap();
    let global = write_global(
        temp_dir.path(),
        r#"
[console]
output = false
info = true

[formatting]
date_pattern = "yyyy"
"#,
    );
    create_config_file(
        temp_dir.path(),
        r#"
[console]
output = true
"#,
    );

    let mut loader = ConfigLoader::with_global_config_path(global);
    let config = loader.load_from_directory(temp_dir.path()).unwrap();

    assert!(config.console_output());
    assert!(config.console_info());
    assert_eq!(config.date_pattern(), "yyyy");
}

#[test]
#[serial]
fn test_env_overrides_project() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(
        temp_dir.path(),
        r#"
[formatting]
date_pattern = "yyyy"
"#,
    );

    std::env::set_var("GROVE_DATE_PATTERN", "dd/MM/yyyy");
    let mut loader = ConfigLoader::with_global_config_path(temp_dir.path().join("none.toml"));
    let config = loader.load_from_file(&path);
    std::env::remove_var("GROVE_DATE_PATTERN");

    assert_eq!(config.unwrap().date_pattern(), "dd/MM/yyyy");
}

#[rstest]
#[case("true", true)]
#[case("1", true)]
#[case("YES", true)]
#[case("false", false)]
#[case("0", false)]
#[case("nope", false)]
#[serial]
fn test_env_bool_parsing(#[case] raw: &str, #[case] expected: bool) {
    let temp_dir = TempDir::new().unwrap();

    std::env::set_var("GROVE_CONSOLE_OUTPUT", raw);
    let mut loader = ConfigLoader::with_global_config_path(temp_dir.path().join("none.toml"));
    let config = loader.load_from_directory(temp_dir.path());
    std::env::remove_var("GROVE_CONSOLE_OUTPUT");

    assert_eq!(config.unwrap().console_output(), expected);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_file_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let result = ProjectConfig::load_from_file(&temp_dir.path().join("missing.toml"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_invalid_toml_reports_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(temp_dir.path(), "[console\noutput = ");
    match ProjectConfig::load_from_file(&path) {
        Err(ConfigError::TomlParseError { file, .. }) => assert_eq!(file, path),
        other => panic!("expected TomlParseError, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_invalid_global_config_propagates() {
    let temp_dir = TempDir::new().unwrap();
    let global = write_global(
        temp_dir.path(),
        r#"
[formatting]
date_pattern = ""
"#,
    );

    let mut loader = ConfigLoader::with_global_config_path(global);
    let result = loader.load_from_directory(temp_dir.path());
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}
