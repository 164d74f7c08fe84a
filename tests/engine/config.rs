//! `evtc.toml` loading

use crate::common::*;
use evtc::core::config::CONFIG_FILE_NAME;
use std::fs;
use tempfile::TempDir;

#[test]
fn partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "server_delay_ms = 50\nmarker_protocol = \"legacy\"\n").unwrap();

    let config = EngineConfig::from_file(&path).unwrap();
    assert_eq!(config.server_delay_ms, 50);
    assert_eq!(config.marker_protocol, "legacy");
    assert_eq!(config.min_cast_duration_ms, 1);
    assert!(config.keep_truncated_casts);
    assert!(config.parallel);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    let config = EngineConfig::from_file_or_default(&path).unwrap();
    assert_eq!(config, EngineConfig::default());
    assert!(EngineConfig::from_file(&path).is_err());
}

#[test]
fn default_file_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    EngineConfig::write_default_if_missing(&path).unwrap();
    assert_eq!(EngineConfig::from_file(&path).unwrap(), EngineConfig::default());

    let custom = EngineConfig {
        server_delay_ms: 25,
        keep_truncated_casts: false,
        ..EngineConfig::default()
    };
    custom.write_to_file(&path).unwrap();
    assert_eq!(EngineConfig::from_file(&path).unwrap(), custom);

    // An existing file is left alone.
    EngineConfig::write_default_if_missing(&path).unwrap();
    assert_eq!(EngineConfig::from_file(&path).unwrap(), custom);
}

#[test]
fn invalid_values_are_config_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    fs::write(&path, "marker_protocol = \"sideways\"\n").unwrap();
    assert!(matches!(EngineConfig::from_file(&path), Err(Error::Config(_))));

    fs::write(&path, "server_delay_ms = 0\n").unwrap();
    assert!(matches!(EngineConfig::from_file(&path), Err(Error::Config(_))));

    fs::write(&path, "server_delay_ms = \"ten\"\n").unwrap();
    assert!(matches!(EngineConfig::from_file(&path), Err(Error::Config(_))));
}

#[test]
fn parser_rejects_invalid_config() {
    let config = EngineConfig {
        min_cast_duration_ms: -1,
        ..EngineConfig::default()
    };
    let result = LogParser::new(LogHeader::new(MODERN_BUILD), vec![], vec![], config);
    assert!(matches!(result, Err(Error::Config(_))));
}
