use crate::conf::{ConfigError, FileConfig, load_file_config};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_all_keys() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("pidcat.toml");
    fs::write(
        &path,
        r#"
tag_width = 30
min_level = "I"
always_display_tags = true
color_gc = true
timestamp = false
tags = ["MyTag"]
ignore_tags = ["chatty", "Choreographer"]
refresh_secs = 5
"#,
    )
    .unwrap();

    // Act
    let config = load_file_config(&path).unwrap();

    // Assert
    assert_eq!(
        config,
        FileConfig {
            tag_width: Some(30),
            min_level: Some("I".to_string()),
            always_display_tags: Some(true),
            color_gc: Some(true),
            timestamp: Some(false),
            tags: vec!["MyTag".to_string()],
            ignore_tags: vec!["chatty".to_string(), "Choreographer".to_string()],
            refresh_secs: Some(5),
        }
    );
}

#[test]
fn empty_file_is_all_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pidcat.toml");
    fs::write(&path, "").unwrap();

    assert_eq!(load_file_config(&path).unwrap(), FileConfig::default());
}

#[test]
fn unknown_key_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pidcat.toml");
    fs::write(&path, "tag_widht = 10\n").unwrap();

    let err = load_file_config(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("pidcat.toml"));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = load_file_config(&path).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}
