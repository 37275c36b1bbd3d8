//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Configuration files (TOML)
//! - Defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default: DefaultConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub colors: ColorConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultConfig {
    #[serde(default = "default_source")]
    pub source: String,

    /// Records file used by the file data source
    pub records: Option<PathBuf>,
}

/// Analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Symbol appended to every bird's alphabet as the terminal state
    #[serde(default = "default_stop_symbol")]
    pub stop_symbol: char,

    /// Also report the probability matrix
    #[serde(default)]
    pub normalize: bool,
}

/// Colour palettes, consumed in order per symbol category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    #[serde(default = "default_intro_colors")]
    pub intro: Vec<String>,

    #[serde(default = "default_song_note_colors")]
    pub song_note: Vec<String>,

    #[serde(default = "default_call_colors")]
    pub call: Vec<String>,

    #[serde(default = "default_stop_color")]
    pub stop: String,
}

/// DOT rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Circle radius in inches
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Pen width of a transition seen once
    #[serde(default = "default_line_width")]
    pub line_width: f64,

    #[serde(default = "default_max_pen_width")]
    pub max_pen_width: f64,

    #[serde(default = "default_node_pen_width")]
    pub node_pen_width: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_source() -> String {
    "mock".to_string()
}

fn default_stop_symbol() -> char {
    '*'
}

fn default_intro_colors() -> Vec<String> {
    ["lightblue", "steelblue", "darkblue", "skyblue", "navy"]
        .map(String::from)
        .to_vec()
}

fn default_song_note_colors() -> Vec<String> {
    [
        "red", "orange", "magenta", "purple", "brown", "pink", "crimson", "salmon",
    ]
    .map(String::from)
    .to_vec()
}

fn default_call_colors() -> Vec<String> {
    ["green", "darkgreen", "olive", "lime"]
        .map(String::from)
        .to_vec()
}

fn default_stop_color() -> String {
    "yellow".to_string()
}

fn default_radius() -> f64 {
    3.0
}

fn default_line_width() -> f64 {
    0.5
}

fn default_max_pen_width() -> f64 {
    8.0
}

fn default_node_pen_width() -> f64 {
    2.5
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations

impl Default for DefaultConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            records: None,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stop_symbol: default_stop_symbol(),
            normalize: false,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            intro: default_intro_colors(),
            song_note: default_song_note_colors(),
            call: default_call_colors(),
            stop: default_stop_color(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            line_width: default_line_width(),
            max_pen_width: default_max_pen_width(),
            node_pen_width: default_node_pen_width(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;

        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./config.toml
    /// 2. ~/.syllable-network/config.toml
    /// 3. /etc/syllable-network/config.toml
    pub fn load() -> Result<Self> {
        let mut paths = vec![PathBuf::from("config.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".syllable-network").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/syllable-network/config.toml"));

        for path in paths {
            if path.exists() {
                tracing::info!("Loading config from {:?}", path);
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Records file from the command line, falling back to the config file
    pub fn records_path(&self, cli_path: Option<PathBuf>) -> Result<PathBuf> {
        cli_path
            .or_else(|| self.default.records.clone())
            .ok_or_else(|| {
                Error::Config(
                    "No records file given. Pass --input or set default.records in the config file"
                        .to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default.source, "mock");
        assert_eq!(config.analysis.stop_symbol, '*');
        assert!(!config.analysis.normalize);
        assert_eq!(config.colors.stop, "yellow");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[default]
source = "file"
records = "birds.toml"

[analysis]
stop_symbol = "$"
normalize = true

[colors]
song_note = ["black"]

[logging]
level = "debug"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.default.source, "file");
        assert_eq!(config.default.records, Some(PathBuf::from("birds.toml")));
        assert_eq!(config.analysis.stop_symbol, '$');
        assert!(config.analysis.normalize);
        assert_eq!(config.colors.song_note, vec!["black".to_string()]);
        assert_eq!(config.colors.stop, "yellow");
        assert_eq!(config.render.line_width, 0.5);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_records_path_precedence() {
        let mut config = Config::default();
        assert!(config.records_path(None).is_err());

        config.default.records = Some(PathBuf::from("from_config.toml"));
        assert_eq!(
            config.records_path(None).unwrap(),
            PathBuf::from("from_config.toml")
        );
        assert_eq!(
            config.records_path(Some(PathBuf::from("cli.json"))).unwrap(),
            PathBuf::from("cli.json")
        );
    }
}
