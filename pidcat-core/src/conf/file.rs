use crate::conf::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Defaults read from a TOML file. Every key is optional; CLI flags win.
///
/// ```toml
/// tag_width = 30
/// min_level = "I"
/// ignore_tags = ["chatty", "Choreographer"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub tag_width: Option<usize>,
    pub min_level: Option<String>,
    pub always_display_tags: Option<bool>,
    pub color_gc: Option<bool>,
    pub timestamp: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ignore_tags: Vec<String>,
    pub refresh_secs: Option<u64>,
}

pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::parse(path, e))
}
