//! Configuration types and parsing for songflow.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "songflow.yml";

/// Main project configuration from songflow.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Project version
    #[serde(default = "default_version")]
    pub version: String,

    /// Directories containing song-metadata JSON files
    #[serde(default = "default_song_paths")]
    pub song_paths: Vec<String>,

    /// Directories containing activity-log JSON files
    #[serde(default = "default_log_paths")]
    pub log_paths: Vec<String>,

    /// Extension of data files picked up by discovery (without the dot)
    #[serde(default = "default_data_extension")]
    pub data_extension: String,

    /// Warehouse database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Warehouse connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Path to the DuckDB database file (`:memory:` for in-memory)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_song_paths() -> Vec<String> {
    vec!["data/song_data".to_string()]
}

fn default_log_paths() -> Vec<String> {
    vec!["data/log_data".to_string()]
}

fn default_data_extension() -> String {
    "json".to_string()
}

fn default_db_path() -> String {
    "target/warehouse.duckdb".to_string()
}

impl Config {
    /// Parse a configuration file at an explicit path.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Config =
            serde_yaml::from_str(&contents).map_err(|e| CoreError::ConfigParseError {
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load `songflow.yml` from a project directory.
    pub fn load(project_dir: &Path) -> CoreResult<Self> {
        Self::from_file(&project_dir.join(CONFIG_FILE))
    }

    /// Song-data roots resolved against the project directory.
    pub fn song_paths_absolute(&self, project_dir: &Path) -> Vec<PathBuf> {
        self.song_paths.iter().map(|p| project_dir.join(p)).collect()
    }

    /// Log-data roots resolved against the project directory.
    pub fn log_paths_absolute(&self, project_dir: &Path) -> Vec<PathBuf> {
        self.log_paths.iter().map(|p| project_dir.join(p)).collect()
    }

    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "project name must not be empty".to_string(),
            });
        }
        if self.data_extension.starts_with('.') {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "data_extension must not include the dot: '{}'",
                    self.data_extension
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
