//! Filtering and aggregate counts over the task collection.
//!
//! Everything here is a pure projection: nothing mutates or re-orders the
//! store's insertion order.

use serde::Serialize;

use crate::error::Error;
use crate::task::Task;

/// List filter mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    /// Cycle order used by the interactive UI
    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Completed,
            Filter::Completed => Filter::Pending,
            Filter::Pending => Filter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Pending => "pending",
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "completed" | "done" => Ok(Filter::Completed),
            "pending" | "open" => Ok(Filter::Pending),
            _ => Err(Error::InvalidArgument(format!(
                "invalid filter '{s}': must be all, completed, or pending"
            ))),
        }
    }
}

/// Select tasks matching the filter, preserving insertion order
pub fn filtered(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| match filter {
            Filter::All => true,
            Filter::Completed => task.completed,
            Filter::Pending => !task.completed,
        })
        .collect()
}

/// Aggregate counts over the full collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Compute total/completed/pending counts
pub fn stats(tasks: &[Task]) -> Stats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    Stats {
        total,
        completed,
        pending: total - completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: i64, completed: bool) -> Task {
        Task {
            id,
            text: format!("task {id}"),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            completed,
            created_at: String::new(),
        }
    }

    #[test]
    fn all_returns_input_order_unchanged() {
        let tasks = vec![task(3, true), task(1, false), task(2, true)];
        let out = filtered(&tasks, Filter::All);
        let ids: Vec<i64> = out.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn completed_and_pending_partition_exactly() {
        let tasks = vec![task(1, true), task(2, false), task(3, true), task(4, false)];
        let completed = filtered(&tasks, Filter::Completed);
        let pending = filtered(&tasks, Filter::Pending);

        assert_eq!(completed.len() + pending.len(), tasks.len());
        for t in &completed {
            assert!(t.completed);
            assert!(!pending.iter().any(|p| p.id == t.id));
        }
        for t in &pending {
            assert!(!t.completed);
        }
    }

    #[test]
    fn stats_counts_match() {
        let tasks = vec![task(1, true), task(2, false), task(3, false)];
        let s = stats(&tasks);
        assert_eq!(
            s,
            Stats {
                total: 3,
                completed: 1,
                pending: 2
            }
        );
    }

    #[test]
    fn stats_on_empty_collection_are_zero() {
        let s = stats(&[]);
        assert_eq!(
            s,
            Stats {
                total: 0,
                completed: 0,
                pending: 0
            }
        );
    }

    #[test]
    fn filter_parses_and_cycles() {
        assert_eq!("completed".parse::<Filter>().unwrap(), Filter::Completed);
        assert_eq!("ALL".parse::<Filter>().unwrap(), Filter::All);
        assert!("nonsense".parse::<Filter>().is_err());
        assert_eq!(Filter::All.next().next().next(), Filter::All);
    }
}
