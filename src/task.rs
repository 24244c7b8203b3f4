//! Task records and the task store.
//!
//! `TaskStore` is the sole owner of the in-memory collection. Every mutating
//! operation that actually changes the collection writes the full collection
//! through to storage before returning; a failed write is reported via
//! [`Applied::save_error`] but the in-memory change is never rolled back.

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::storage::Storage;

/// Date format accepted on input and used in the persisted layout
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single dated todo item.
///
/// Serialized with camelCase field names; `date` round-trips as an ISO
/// `YYYY-MM-DD` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub date: NaiveDate,
    pub completed: bool,
    /// Localized creation timestamp, informational only, never mutated.
    pub created_at: String,
}

/// Validated input for `add` and `update`.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    text: String,
    date: NaiveDate,
}

impl TaskDraft {
    /// Validate a draft from already-parsed parts. Text is trimmed and must
    /// be non-empty.
    pub fn new(text: &str, date: NaiveDate) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyText);
        }
        Ok(Self {
            text: text.to_string(),
            date,
        })
    }

    /// Validate a draft from raw strings, parsing the date as `YYYY-MM-DD`.
    pub fn parse(text: &str, date: &str) -> Result<Self> {
        let date = parse_date(date)?;
        Self::new(text, date)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Parse a user-supplied `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(value.to_string()))
}

/// Outcome of a mutating store operation.
///
/// `save_error` is set when the write-through to storage failed; the
/// in-memory change has still been applied.
#[derive(Debug)]
pub struct Applied<T> {
    pub value: T,
    pub save_error: Option<Error>,
}

/// Owner of the task collection, with write-through persistence.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Storage,
}

impl TaskStore {
    /// Load the store from storage. The warning, if any, describes stored
    /// data that had to be discarded; the store starts empty in that case.
    pub fn open(storage: Storage) -> (Self, Option<String>) {
        let report = storage.load();
        (
            Self {
                tasks: report.tasks,
                storage,
            },
            report.warning,
        )
    }

    /// Read-only view of the collection, insertion order preserved
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Append a new task built from a validated draft.
    pub fn add(&mut self, draft: &TaskDraft) -> Result<Applied<Task>> {
        let task = Task {
            id: self.next_id(),
            text: draft.text().to_string(),
            date: draft.date(),
            completed: false,
            created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        self.tasks.push(task.clone());
        Ok(Applied {
            value: task,
            save_error: self.persist(),
        })
    }

    /// Flip the completion flag of an existing task.
    pub fn toggle(&mut self, id: i64) -> Result<Applied<Task>> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        task.completed = !task.completed;
        let value = task.clone();
        Ok(Applied {
            value,
            save_error: self.persist(),
        })
    }

    /// Replace text and date of an existing task in place, preserving
    /// `id`, `completed` and `created_at`.
    pub fn update(&mut self, id: i64, draft: &TaskDraft) -> Result<Applied<Task>> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        task.text = draft.text().to_string();
        task.date = draft.date();
        let value = task.clone();
        Ok(Applied {
            value,
            save_error: self.persist(),
        })
    }

    /// Remove a task by id.
    pub fn remove(&mut self, id: i64) -> Result<Applied<Task>> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        let task = self.tasks.remove(idx);
        Ok(Applied {
            value: task,
            save_error: self.persist(),
        })
    }

    /// Millisecond-timestamp id, bumped past any collision so ids stay
    /// unique within the collection.
    fn next_id(&self) -> i64 {
        let mut id = Utc::now().timestamp_millis();
        while self.tasks.iter().any(|t| t.id == id) {
            id += 1;
        }
        id
    }

    fn persist(&self) -> Option<Error> {
        match self.storage.save(&self.tasks) {
            Ok(()) => None,
            Err(err) => {
                warn!(%err, "write-through save failed; in-memory state kept");
                Some(err)
            }
        }
    }
}
