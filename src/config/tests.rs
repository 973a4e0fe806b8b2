//! Tests for config functionality.

use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::SemaphoreError;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.root, PathBuf::from(".filesem"));
    assert_eq!(config.lease_seconds, 3600);
    assert!(config.event_log.is_none());
    assert_eq!(config.log_filter, "info");
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
root: /mnt/shared/locks
lease_seconds: 90
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.root, PathBuf::from("/mnt/shared/locks"));
    assert_eq!(config.lease_seconds, 90);
    assert_eq!(config.log_filter, "info");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
root: locks
lease_seconds: 5
event_log: logs/filesem.ndjson
log_filter: filesem=debug
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.event_log, Some(PathBuf::from("logs/filesem.ndjson")));
    assert_eq!(config.log_filter, "filesem=debug");
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
lease_seconds: 10
future_option: true
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.lease_seconds, 10);
}

#[test]
fn test_zero_lease_is_rejected() {
    let err = Config::from_yaml("lease_seconds: 0").unwrap_err();

    assert!(matches!(err, SemaphoreError::Config(_)));
    assert!(err.to_string().contains("lease_seconds"));
}

#[test]
fn test_negative_lease_is_a_parse_error() {
    let err = Config::from_yaml("lease_seconds: -3").unwrap_err();
    assert!(matches!(err, SemaphoreError::Config(_)));
}

#[test]
fn test_empty_root_is_rejected() {
    let err = Config::from_yaml("root: ''").unwrap_err();
    assert!(err.to_string().contains("root"));
}

#[test]
fn test_yaml_round_trip_keeps_values() {
    let config = Config {
        root: PathBuf::from("/srv/locks"),
        lease_seconds: 120,
        event_log: Some(PathBuf::from("/var/log/filesem.ndjson")),
        log_filter: "warn".to_string(),
    };

    let parsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_discover_without_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();

    assert_eq!(Config::discover(temp_dir.path()).unwrap(), Config::default());
}

#[test]
fn test_discover_loads_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "lease_seconds: 7\n").unwrap();

    assert_eq!(Config::discover(temp_dir.path()).unwrap().lease_seconds, 7);
}

#[test]
fn test_load_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    let err = Config::load(temp_dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, SemaphoreError::Config(_)));
}
