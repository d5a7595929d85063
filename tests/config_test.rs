//! Unit tests for config.rs module

use std::io::Write;
use std::time::Duration;

use sms_history::config::{AppConfig, DatabaseConfig, LoggingConfig};

#[test]
fn test_default_database_config() {
    let config = DatabaseConfig::default();

    assert_eq!(config.path, "data/mmclisms.db");
    assert_eq!(config.max_connections, 4);
    assert_eq!(config.connection_timeout(), Duration::from_secs(30));
    assert_eq!(config.busy_timeout(), Duration::from_millis(5000));
}

#[test]
fn test_default_logging_config() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, "info");
    assert_eq!(config.file_path, None);
    assert_eq!(config.format, "text");
}

#[test]
fn test_config_validation_success() {
    assert!(AppConfig::default().validate().is_ok());
}

#[test]
fn test_config_validation_zero_max_connections() {
    let mut config = AppConfig::default();
    config.database.max_connections = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_zero_connection_timeout() {
    let mut config = AppConfig::default();
    config.database.connection_timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_empty_path() {
    let mut config = AppConfig::default();
    config.database.path = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_log_levels() {
    for level in ["trace", "debug", "info", "warn", "error"] {
        let mut config = AppConfig::default();
        config.logging.level = level.to_string();
        assert!(config.validate().is_ok(), "Failed for level: {level}");
    }

    let mut config = AppConfig::default();
    config.logging.level = "invalid".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_log_formats() {
    for format in ["text", "json"] {
        let mut config = AppConfig::default();
        config.logging.format = format.to_string();
        assert!(config.validate().is_ok(), "Failed for format: {format}");
    }

    let mut config = AppConfig::default();
    config.logging.format = "xml".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_load_from_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[database]\npath = \"/var/lib/sms/history.db\"\nmax_connections = 2").unwrap();
    drop(file);

    let config = AppConfig::load_from(Some(&path)).unwrap();
    assert_eq!(config.database.path, "/var/lib/sms/history.db");
    assert_eq!(config.database.max_connections, 2);
    assert_eq!(config.database.connection_timeout_secs, 30);
}

#[test]
fn test_load_rejects_invalid_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.toml");
    std::fs::write(&path, "[logging]\nformat = \"xml\"\n").unwrap();

    assert!(AppConfig::load_from(Some(&path)).is_err());
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(AppConfig::load_from(Some(&path)).is_err());
}

#[test]
fn test_environment_overrides_defaults() {
    std::env::set_var("SMS_HISTORY__DATABASE__BUSY_TIMEOUT_MS", "250");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("SMS_HISTORY__DATABASE__BUSY_TIMEOUT_MS");

    assert_eq!(config.database.busy_timeout(), Duration::from_millis(250));
}
