//! Persistence adapter for tuido
//!
//! The whole task collection lives in a single JSON file (`todos.json`),
//! written atomically via temp file + rename so readers never observe a
//! partial write. Loading fails soft: a missing file is an empty collection,
//! and corrupt content is discarded wholesale rather than half-parsed.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::task::Task;

/// File name of the persisted task collection
pub const DATA_FILE: &str = "todos.json";

/// Result of loading the persisted collection.
///
/// `warning` is set (at most once per load) when stored data existed but
/// could not be used; the tasks are then empty and the caller is expected to
/// surface the message without aborting.
#[derive(Debug)]
pub struct LoadReport {
    pub tasks: Vec<Task>,
    pub warning: Option<String>,
}

/// Storage manager for the task collection
#[derive(Debug, Clone)]
pub struct Storage {
    data_file: PathBuf,
}

impl Storage {
    /// Create a storage manager writing to the given file
    pub fn new(data_file: PathBuf) -> Self {
        Self { data_file }
    }

    /// Resolve the data file: explicit flag first, then config override,
    /// then the platform data directory.
    pub fn resolve(flag: Option<&Path>, config: &Config) -> Result<Self> {
        if let Some(path) = flag {
            return Ok(Self::new(path.to_path_buf()));
        }
        if let Some(path) = config.data.path.as_deref() {
            return Ok(Self::new(path.to_path_buf()));
        }
        let dirs = directories::ProjectDirs::from("", "", "tuido")
            .ok_or(Error::DataDirUnavailable)?;
        Ok(Self::new(dirs.data_dir().join(DATA_FILE)))
    }

    /// Path of the data file
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Serialize the full task collection to disk (atomic)
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        self.write_atomic(json.as_bytes())?;
        debug!(count = tasks.len(), path = %self.data_file.display(), "saved tasks");
        Ok(())
    }

    /// Read the persisted collection, falling back to empty on absence or
    /// corruption. Never returns a partially-parsed structure.
    pub fn load(&self) -> LoadReport {
        if !self.data_file.exists() {
            return LoadReport {
                tasks: Vec::new(),
                warning: None,
            };
        }

        let content = match fs::read_to_string(&self.data_file) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %self.data_file.display(), %err, "failed to read data file");
                return LoadReport {
                    tasks: Vec::new(),
                    warning: Some(format!(
                        "could not read {}: {err}; starting with an empty list",
                        self.data_file.display()
                    )),
                };
            }
        };

        match serde_json::from_str::<Vec<Task>>(&content) {
            Ok(tasks) => LoadReport {
                tasks,
                warning: None,
            },
            Err(err) => {
                warn!(path = %self.data_file.display(), %err, "discarding corrupt data file");
                LoadReport {
                    tasks: Vec::new(),
                    warning: Some(format!(
                        "stored data in {} is corrupt ({err}); starting with an empty list",
                        self.data_file.display()
                    )),
                }
            }
        }
    }

    /// Write data atomically using temp file + rename
    fn write_atomic(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.data_file.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.data_file.with_extension("json.tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.data_file)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn task(id: i64, text: &str, date: &str, completed: bool) -> Task {
        Task {
            id,
            text: text.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            completed,
            created_at: "2024-03-01 09:00:00".to_string(),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join(DATA_FILE));
        let report = storage.load();
        assert!(report.tasks.is_empty());
        assert!(report.warning.is_none());
    }

    #[test]
    fn save_load_round_trip_preserves_order_and_fields() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join(DATA_FILE));

        let tasks = vec![
            task(1, "write report", "2024-03-15", false),
            task(2, "buy milk", "2024-03-14", true),
            task(3, "call dentist", "2024-04-01", false),
        ];
        storage.save(&tasks).unwrap();

        let report = storage.load();
        assert!(report.warning.is_none());
        assert_eq!(report.tasks.len(), 3);
        for (saved, loaded) in tasks.iter().zip(report.tasks.iter()) {
            assert_eq!(saved.id, loaded.id);
            assert_eq!(saved.text, loaded.text);
            assert_eq!(saved.date, loaded.date);
            assert_eq!(saved.completed, loaded.completed);
            assert_eq!(saved.created_at, loaded.created_at);
        }
    }

    #[test]
    fn persisted_layout_uses_camel_case_and_iso_dates() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join(DATA_FILE));
        storage.save(&[task(5, "x", "2024-03-15", false)]).unwrap();

        let raw = std::fs::read_to_string(storage.data_file()).unwrap();
        assert!(raw.contains("\"createdAt\""));
        assert!(raw.contains("\"2024-03-15\""));
    }

    #[test]
    fn corrupt_file_loads_empty_with_one_warning() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DATA_FILE);
        std::fs::write(&path, "{not json").unwrap();

        let storage = Storage::new(path);
        let report = storage.load();
        assert!(report.tasks.is_empty());
        assert!(report.warning.is_some());
    }

    #[test]
    fn structurally_incompatible_data_is_discarded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DATA_FILE);
        // Valid JSON, wrong shape: treated as corrupt, never half-parsed.
        std::fs::write(&path, r#"{"todos": 3}"#).unwrap();

        let storage = Storage::new(path);
        let report = storage.load();
        assert!(report.tasks.is_empty());
        assert!(report.warning.is_some());
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join("nested/dir").join(DATA_FILE));
        storage.save(&[]).unwrap();
        assert!(storage.data_file().exists());
    }
}
