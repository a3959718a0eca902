// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use camera_preview::{Config, Facing};

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(
        config.report_window_frames, 30,
        "FPS should be reported every 30 frames by default"
    );
    assert_eq!(config.initial_facing(), Facing::Back);
}

#[test]
fn test_config_load_from_file() {
    let path = std::env::temp_dir().join(format!(
        "camera-preview-config-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, r#"{ "front_facing": true, "source_fps": 60 }"#).unwrap();

    let config = Config::load(Some(&path)).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(config.front_facing);
    assert_eq!(config.source_fps, 60);
    assert_eq!(config.preview_width, 1920);
}

#[test]
fn test_config_round_trips_through_json() {
    let config = Config {
        report_window_frames: 15,
        ..Config::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json(&json).unwrap(), config);
}
