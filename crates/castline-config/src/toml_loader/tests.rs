//! Tests for TOML config loading, creation, and path resolution.

use super::loader::resolve_config_path;
use super::*;
use castline_common::{ConfigError, ShareQuality, VideoType};
use std::path::{Path, PathBuf};

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_castline_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[session]
api_key = "47000001"
session_id = "1_MX40NzAwMDAwMX5-"
token = "T1==cGFydG5lcl9pZD0"

[publisher]
quality = "high"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.session.api_key, "47000001");
    assert_eq!(config.session.token, "T1==cGFydG5lcl9pZD0");
    assert_eq!(config.publisher.quality, ShareQuality::High);
    // Defaults preserved
    assert_eq!(config.publisher.video_type, VideoType::Screen);
    assert!(!config.publisher.audio_fallback);
    assert!(!config.subscriber.subscribe_to_self);
    assert_eq!(config.ui.alert_capacity, 16);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_unknown_enum_value_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[publisher]\nvideo_type = \"hologram\"\n").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_out_of_range_value_returns_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[ui]\nalert_capacity = 0\n").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("castline").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert!(config.session.api_key.is_empty());
    assert_eq!(config.publisher.quality, ShareQuality::Medium);
    assert!(config.ui.show_clock);
}

#[test]
fn config_path_defaults_to_platform_dir() {
    let path = resolve_config_path(|_| None, Some(PathBuf::from("/home/u/.config"))).unwrap();
    assert_eq!(path, PathBuf::from("/home/u/.config/castline/config.toml"));
}

#[test]
fn config_path_env_override_wins() {
    let lookup = |key: &str| (key == ENV_CONFIG_PATH).then(|| "/srv/castline.toml".to_string());
    let path = resolve_config_path(lookup, Some(PathBuf::from("/home/u/.config"))).unwrap();
    assert_eq!(path, PathBuf::from("/srv/castline.toml"));
}

#[test]
fn blank_env_override_is_ignored() {
    let path = resolve_config_path(|_| Some("  ".into()), Some(PathBuf::from("/cfg"))).unwrap();
    assert_eq!(path, PathBuf::from("/cfg/castline/config.toml"));
}

#[test]
fn config_path_without_platform_dir_is_an_error() {
    let result = resolve_config_path(|_| None, None);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}
