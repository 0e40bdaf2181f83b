use kentry_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_converts_on_submit_only() {
    let cfg = Config::default();

    assert!(!cfg.convert_immediately);
    assert!(cfg.ui_color_enabled);
    assert!(cfg.log_filter.is_none());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    assert_eq!(manager.load().expect("load"), Config::default());
    assert!(manager.config_path().ends_with("config/config.json"));
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let cfg = Config {
        convert_immediately: true,
        ui_color_enabled: false,
        log_filter: Some("kana_entry=debug".into()),
    };

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn partial_file_fills_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "convert_immediately": true }"#).expect("write");

    let loaded = ConfigManager::new(path).load().expect("load");

    assert!(loaded.convert_immediately);
    assert!(loaded.ui_color_enabled);
}

#[test]
fn malformed_file_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json").expect("write");

    let err = ConfigManager::new(path).load().unwrap_err();

    assert!(matches!(err, ConfigError::Serde(_)));
}

#[test]
fn directory_in_place_of_file_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::create_dir_all(&path).expect("mkdir");

    let err = ConfigManager::new(path).load().unwrap_err();

    assert!(matches!(err, ConfigError::NotAFile(_)));
}
