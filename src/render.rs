//! List view projection.
//!
//! Pure functions shared by the CLI `list` output and the interactive UI:
//! the store's filtered view becomes a sequence of [`ListRow`]s with
//! display-safe text and a human date label.

use chrono::NaiveDate;
use serde::Serialize;

use crate::task::Task;

/// One row of the rendered task list
#[derive(Debug, Clone, Serialize)]
pub struct ListRow {
    pub id: i64,
    pub completed: bool,
    pub text: String,
    pub date: NaiveDate,
    pub date_label: String,
}

/// Placeholder shown instead of an empty list container
pub const EMPTY_PLACEHOLDER: &str = "No tasks. Add one to get started.";

/// Project tasks into display rows, one per task, order preserved
pub fn list_rows<'a, I>(tasks: I) -> Vec<ListRow>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .map(|task| ListRow {
            id: task.id,
            completed: task.completed,
            text: sanitize_text(&task.text),
            date: task.date,
            date_label: date_label(task.date),
        })
        .collect()
}

/// Human date label in "<month> <day>" style, e.g. "Mar 15"
pub fn date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Strip control characters from user-supplied text before it reaches the
/// terminal. Escape sequences embedded in task text must not be able to
/// rewrite the display; this is the terminal counterpart of HTML escaping.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter_map(|ch| {
            if ch == '\n' || ch == '\t' || ch == '\r' {
                Some(' ')
            } else if ch.is_control() {
                None
            } else {
                Some(ch)
            }
        })
        .collect()
}
