use crate::normalize::Cosmetics;
use crate::planner::SmartOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Front-end defaults, read from a TOML file the caller points at.
///
/// Never written back; every run starts from this file (or the defaults).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub smart: SmartConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default preview format: "tree", "table", "summary", or "json"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,

    /// Whether previews list hidden files
    #[serde(default = "default_true")]
    pub show_hidden: bool,

    /// Journal file for apply runs
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_format: default_preview(),
            use_color: None,
            show_hidden: true,
            log_file: None,
        }
    }
}

/// Smart-mode switches
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmartConfig {
    #[serde(default = "default_true")]
    pub strip_leading_zero: bool,
    #[serde(default)]
    pub capitalize_bpm: bool,
    #[serde(default)]
    pub title_case_words: bool,
    #[serde(default)]
    pub underscores_to_spaces: bool,
}

impl Default for SmartConfig {
    fn default() -> Self {
        Self {
            strip_leading_zero: true,
            capitalize_bpm: false,
            title_case_words: false,
            underscores_to_spaces: false,
        }
    }
}

impl From<SmartConfig> for SmartOptions {
    fn from(config: SmartConfig) -> Self {
        Self {
            strip_leading_zero: config.strip_leading_zero,
            cosmetics: Cosmetics {
                capitalize_bpm: config.capitalize_bpm,
                title_case_words: config.title_case_words,
                underscores_to_spaces: config.underscores_to_spaces,
            },
        }
    }
}

fn default_preview() -> String {
    "tree".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.preview_format, "tree");
        assert_eq!(config.defaults.use_color, None);
        assert!(config.defaults.show_hidden);
        assert!(config.smart.strip_leading_zero);
        assert!(!config.smart.capitalize_bpm);
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.defaults.preview_format, "tree");
    }

    #[test]
    fn test_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("stripname.toml");
        fs::write(
            &config_path,
            r#"
[defaults]
preview_format = "table"
use_color = false
show_hidden = false

[smart]
strip_leading_zero = false
title_case_words = true
"#,
        )
        .unwrap();

        let config = Config::load(Some(config_path.as_path())).unwrap();
        assert_eq!(config.defaults.preview_format, "table");
        assert_eq!(config.defaults.use_color, Some(false));
        assert!(!config.defaults.show_hidden);

        let options = SmartOptions::from(config.smart);
        assert!(!options.strip_leading_zero);
        assert!(options.cosmetics.title_case_words);
        assert!(!options.cosmetics.underscores_to_spaces);
    }

    #[test]
    fn test_partial_config() {
        let toml_content = r#"
[defaults]
preview_format = "json"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.defaults.preview_format, "json");
        // Other fields should have their defaults
        assert!(config.defaults.show_hidden);
        assert!(config.smart.strip_leading_zero);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load(Some(temp_dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read config"));
    }
}
