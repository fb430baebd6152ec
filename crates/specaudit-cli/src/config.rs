//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Environment variables (see `logging`)
//!
//! Command-line flags are applied on top by the handlers.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path settings
    pub paths: PathConfig,

    /// Validation settings
    pub validation: ValidationConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingSettings,
}

/// Path configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Directory holding the specification files
    pub specs_dir: PathBuf,
}

/// Validation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Treat warnings as errors
    pub strict: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration as read from the file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error) or a filter directive
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Log file path
    pub file: Option<PathBuf>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            specs_dir: PathBuf::from("specs"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from a file; the extension picks the format
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => {
                // An empty YAML file is an empty configuration
                if content.trim().is_empty() {
                    Self::default()
                } else {
                    serde_yaml::from_str(&content)?
                }
            }
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(Error::config(format!(
                    "Unsupported configuration format: {}",
                    path.display()
                )))
            }
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".specaudit.yaml"),
            PathBuf::from(".specaudit.json"),
            PathBuf::from(".specaudit.toml"),
            PathBuf::from("specaudit.yaml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let specaudit_dir = config_dir.join("specaudit");
            paths.push(specaudit_dir.join("config.yaml"));
            paths.push(specaudit_dir.join("config.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.paths.specs_dir, PathBuf::from("specs"));
        assert!(!config.validation.strict);
        assert_eq!(config.output.format, "human");
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_load_yaml_partial() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("specaudit.yaml");
        fs::write(&path, "validation:\n  strict: true\nlogging:\n  level: debug\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.validation.strict);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.paths.specs_dir, PathBuf::from("specs"));
    }

    #[test]
    fn test_load_toml_and_json() {
        let dir = TempDir::new().unwrap();

        let toml_path = dir.path().join("config.toml");
        fs::write(&toml_path, "[paths]\nspecs_dir = \"catalogs\"\n\n[output]\nformat = \"json\"\n").unwrap();
        let config = Config::from_file(&toml_path).unwrap();
        assert_eq!(config.paths.specs_dir, PathBuf::from("catalogs"));
        assert_eq!(config.output.format, "json");
        assert!(config.output.color);

        let json_path = dir.path().join("config.json");
        fs::write(&json_path, r#"{"output": {"color": false}}"#).unwrap();
        let config = Config::from_file(&json_path).unwrap();
        assert!(!config.output.color);
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();

        let missing = Config::load_with_file(Some(&dir.path().join("none.yaml"))).unwrap_err();
        assert!(matches!(missing, Error::FileNotFound { .. }));

        let ini = dir.path().join("config.ini");
        fs::write(&ini, "x=1").unwrap();
        assert!(matches!(Config::from_file(&ini), Err(Error::Config(_))));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "paths = [").unwrap();
        assert!(matches!(Config::from_file(&bad), Err(Error::Toml(_))));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".specaudit.yaml");
        fs::write(&path, "").unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }
}
