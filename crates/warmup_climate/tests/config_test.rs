use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use warmup_climate::config::LoadError;
use warmup_climate::Config;
use warmup_climate::ConfigError;
use warmup_climate::LogLevel;

#[test]
fn test_load_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("warmup.toml");
    fs::write(
        &path,
        r#"
[logging]
level = "debug"

[warmup.bathroom]
name = "Bathroom floor"
username = "me@example.com"
password = "hunter2"
location = "Home"
room = "Bathroom"
target_temp = 21.5

[warmup.kitchen]
username = "me@example.com"
password = "hunter2"
location = "Home"
room = "Kitchen"
"#,
    )
    .unwrap();

    let (config, diagnostics) = Config::from_file(&path).unwrap();
    assert!(diagnostics.0.is_empty());
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.warmup.len(), 2);

    let bathroom = &config.warmup["bathroom"];
    assert_eq!(bathroom.name, "Bathroom floor");
    assert_eq!(bathroom.target_temp, 21.5);

    let kitchen = &config.warmup["kitchen"];
    assert_eq!(kitchen.name, "warmup4ie");
    assert_eq!(kitchen.target_temp, 20.0);
}

#[test]
fn test_validation_errors_point_at_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(
        &path,
        r#"
[warmup.bathroom]
username = "me@example.com"
password = "hunter2"
location = ["Home"]
"#,
    )
    .unwrap();

    let err = Config::from_file(&path).unwrap_err();
    let ConfigError::Invalid(diagnostics) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(diagnostics.0.len(), 2);

    let msg = diagnostics.to_string();
    assert!(msg.contains("warmup.bathroom.location"));
    assert!(msg.contains("expected a string, found array"));
    assert!(msg.contains("broken.toml"));
    assert!(msg.contains("room is required"));
}

#[test]
fn test_missing_file_error() {
    let missing_path = PathBuf::from("/nonexistent/warmup.toml");

    let err = Config::from_file(&missing_path).unwrap_err();
    assert!(matches!(err, ConfigError::Load(LoadError::Io { .. })));

    let err_msg = err.to_string();
    assert!(err_msg.contains("Failed to read"));
    assert!(err_msg.contains("/nonexistent/warmup.toml"));
}
