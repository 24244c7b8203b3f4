//! Configuration loading and management
//!
//! Handles parsing of the optional `config.toml` in the platform config
//! directory (e.g. `~/.config/tuido/config.toml`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data file location
    #[serde(default)]
    pub data: DataConfig,

    /// Calendar view configuration
    #[serde(default)]
    pub calendar: CalendarConfig,
}

/// Data file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Override for the todos.json path
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Calendar-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Maximum tasks shown per day cell before the overflow marker
    #[serde(default = "default_cell_tasks")]
    pub cell_tasks: usize,
}

fn default_cell_tasks() -> usize {
    crate::calendar::DEFAULT_CELL_TASKS
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            cell_tasks: default_cell_tasks(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// A missing file yields defaults; a malformed file is a user error
    /// naming the offending path.
    pub fn load() -> Result<Self> {
        match config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|err| Error::InvalidConfig {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        })
    }
}

/// Path of the config file, if the platform exposes a config directory
pub fn config_file() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "tuido")?;
    Some(dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert!(config.data.path.is_none());
        assert_eq!(config.calendar.cell_tasks, 3);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[data]\npath = \"/tmp/todos.json\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.data.path.as_deref(),
            Some(Path::new("/tmp/todos.json"))
        );
        assert_eq!(config.calendar.cell_tasks, 3);
    }

    #[test]
    fn malformed_file_is_user_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "calendar = nonsense").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_codes::USER_ERROR);
    }
}
