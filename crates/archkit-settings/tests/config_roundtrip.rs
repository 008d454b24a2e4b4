//! Integration tests for config file round trips and validation.

use archkit_settings::{Config, Theme};
use std::path::PathBuf;

#[test]
fn json_round_trip_preserves_sections() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.json");

    let mut config = Config::new();
    config.canvas.default_node_width = 120.0;
    config.canvas.snap_to_grid = true;
    config.ui.theme = Theme::Dark;
    config.autosave.interval_secs = 60;
    config.add_recent_file(PathBuf::from("/tmp/system.archkit.json"));

    config.save_to_file(&path).expect("save config");
    let loaded = Config::load_from_file(&path).expect("load config");

    assert_eq!(loaded.canvas.default_node_width, 120.0);
    assert!(loaded.canvas.snap_to_grid);
    assert_eq!(loaded.ui.theme, Theme::Dark);
    assert_eq!(loaded.autosave.interval_secs, 60);
    assert_eq!(
        loaded.recent_files,
        vec![PathBuf::from("/tmp/system.archkit.json")]
    );
}

#[test]
fn toml_round_trip_preserves_sections() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");

    let mut config = Config::new();
    config.canvas.grid_size = 25.0;
    config.ui.show_grid = false;

    config.save_to_file(&path).expect("save config");
    let loaded = Config::load_from_file(&path).expect("load config");

    assert_eq!(loaded.canvas.grid_size, 25.0);
    assert!(!loaded.ui.show_grid);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.yaml");

    let config = Config::new();
    assert!(config.save_to_file(&path).is_err());
    assert!(Config::load_from_file(&path).is_err());
}

#[test]
fn invalid_values_fail_validation() {
    let mut config = Config::new();
    config.canvas.grid_size = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::new();
    config.canvas.connection_control_offset = f64::NAN;
    assert!(config.validate().is_err());

    let mut config = Config::new();
    config.autosave.session_key.clear();
    assert!(config.validate().is_err());
}

#[test]
fn invalid_file_fails_on_load() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.json");

    let mut config = Config::new();
    config.autosave.interval_secs = 0;
    // Bypass save_to_file validation to simulate a hand-edited file.
    std::fs::write(&path, serde_json::to_string(&config).expect("serialize"))
        .expect("write config");

    assert!(Config::load_from_file(&path).is_err());
}

#[test]
fn recent_files_dedupe_and_trim() {
    let mut config = Config::new();
    config.export.recent_files_count = 3;

    for i in 0..4 {
        config.add_recent_file(PathBuf::from(format!("/tmp/diagram-{}.json", i)));
    }
    config.add_recent_file(PathBuf::from("/tmp/diagram-2.json"));

    assert_eq!(config.recent_files.len(), 3);
    assert_eq!(config.recent_files[0], PathBuf::from("/tmp/diagram-2.json"));
    assert_eq!(config.recent_files[1], PathBuf::from("/tmp/diagram-3.json"));
}

#[test]
fn merge_takes_configured_ui_section() {
    let mut base = Config::new();
    let mut other = Config::new();
    other.ui.theme = Theme::Light;
    other.ui.window_width = 1920;

    base.merge(&other);
    assert_eq!(base.ui.theme, Theme::Light);
    assert_eq!(base.ui.window_width, 1920);
}

#[test]
fn merge_keeps_ui_when_other_is_default() {
    let mut base = Config::new();
    base.ui.theme = Theme::Dark;

    let other = Config::new();
    base.merge(&other);
    assert_eq!(base.ui.theme, Theme::Dark);
}
