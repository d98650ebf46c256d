use ftrack_config::{Config, ConfigError, ConfigManager, DateStyle};
use std::fs;
use tempfile::tempdir;

#[test]
fn default_config_matches_dashboard_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.locale, "en-US");
    assert_eq!(cfg.currency, "USD");
    assert_eq!(cfg.dashboard_months, 6);
    assert_eq!(cfg.top_categories, 5);
    assert_eq!(cfg.recent_transactions, 5);
    assert!(cfg.ui_color_enabled);
    assert_eq!(cfg.date_style(), DateStyle::UnitedStates);
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");

    assert_eq!(manager.config_path(), dir.path().join("config").join("config.json"));
    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.locale = "en-GB".to_string();
    cfg.dashboard_months = 12;
    cfg.ui_color_enabled = false;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.date_style(), DateStyle::DayFirst);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "locale": "de-DE", "currency": "EUR" }"#).expect("write");

    let loaded = ConfigManager::new(path).load().expect("load");
    assert_eq!(loaded.currency, "EUR");
    assert_eq!(loaded.top_categories, 5);
    assert_eq!(loaded.data_dir, None);
}

#[test]
fn malformed_file_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "{ locale").expect("write");

    let err = ConfigManager::new(path).load().expect_err("should fail");
    assert!(matches!(err, ConfigError::Serde(_)));
}
