//! Unit tests for configuration loading and defaults.

use ridelog::storage::config::{load_config_from, save_config_to};
use ridelog::storage::AppConfig;
use std::path::PathBuf;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("config.toml")).unwrap();

    assert_eq!(config.timezone, "America/Denver");
    assert_eq!(config.recent_window_days, 14);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = AppConfig {
        import_dir: PathBuf::from("/rides/inbox"),
        data_dir: PathBuf::from("/rides/history"),
        timezone: "Europe/Paris".to_string(),
        recent_window_days: 30,
        ..AppConfig::default()
    };
    save_config_to(&path, &config).unwrap();
    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded.import_dir, config.import_dir);
    assert_eq!(loaded.data_dir, config.data_dir);
    assert_eq!(loaded.timezone, "Europe/Paris");
    assert_eq!(loaded.recent_window_days, 30);
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "timezone = \"America/Chicago\"\n").unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.timezone, "America/Chicago");
    assert_eq!(loaded.recent_window_days, 14);
}

#[test]
fn test_reference_zone_parses_the_configured_name() {
    let config = AppConfig {
        timezone: "Europe/Paris".to_string(),
        ..AppConfig::default()
    };
    assert_eq!(config.reference_zone(), chrono_tz::Europe::Paris);
}

#[test]
fn test_unknown_zone_falls_back_to_denver() {
    let config = AppConfig {
        timezone: "Mars/Olympus_Mons".to_string(),
        ..AppConfig::default()
    };
    assert_eq!(config.reference_zone(), chrono_tz::America::Denver);
}

#[test]
fn test_malformed_toml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "timezone = [not toml").unwrap();
    assert!(load_config_from(&path).is_err());
}
