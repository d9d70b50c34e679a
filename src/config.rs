//! Application configuration loaded from an optional TOML file.

use crate::stats::AggregateSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "chartify_titles.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid config {}: {field} must be at least 1", path.display())]
    Zero { path: PathBuf, field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source_path: PathBuf,
    pub cleaned_path: PathBuf,
    pub chart_dir: PathBuf,
    pub top_n: usize,
    pub histogram_bins: usize,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("netflix_titles.csv"),
            cleaned_path: PathBuf::from("netflix_titles_cleaned.csv"),
            chart_dir: PathBuf::from("charts"),
            top_n: 10,
            histogram_bins: 30,
            chart_width: 1000,
            chart_height: 600,
        }
    }
}

impl AppConfig {
    /// Load from `path` if given, else from [`DEFAULT_CONFIG_FILE`] when it
    /// exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(field) = config.zero_field() {
            return Err(ConfigError::Zero {
                path: path.to_path_buf(),
                field,
            });
        }
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// First count setting that is zero, if any.
    pub fn zero_field(&self) -> Option<&'static str> {
        [
            ("top_n", self.top_n),
            ("histogram_bins", self.histogram_bins),
        ]
        .into_iter()
        .find(|(_, value)| *value == 0)
        .map(|(field, _)| field)
    }

    pub fn aggregate_settings(&self) -> AggregateSettings {
        AggregateSettings {
            top_n: self.top_n,
            histogram_bins: self.histogram_bins,
        }
    }
}
