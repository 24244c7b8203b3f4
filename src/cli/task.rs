//! tuido task command implementations.

use std::path::PathBuf;

use chrono::Local;

use crate::cli::open_store;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::query::{self, Filter};
use crate::render::{self, EMPTY_PLACEHOLDER};
use crate::task::TaskDraft;

pub struct AddOptions {
    pub text: String,
    pub date: Option<String>,
    pub data: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub filter: String,
    pub data: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DoneOptions {
    pub id: i64,
    pub data: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: i64,
    pub text: Option<String>,
    pub date: Option<String>,
    pub data: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct RmOptions {
    pub id: i64,
    pub yes: bool,
    pub data: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct StatsOptions {
    pub data: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

fn push_storage_warnings(
    human: &mut HumanOutput,
    load_warning: Option<String>,
    save_error: Option<Error>,
) {
    if let Some(warning) = load_warning {
        human.push_warning(warning);
    }
    if let Some(err) = save_error {
        human.push_warning(format!("saving failed: {err}; the change was not persisted"));
    }
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let output = OutputOptions {
        json: options.json,
        quiet: options.quiet,
    };

    let draft = match options.date.as_deref() {
        Some(date) => TaskDraft::parse(&options.text, date)?,
        None => TaskDraft::new(&options.text, Local::now().date_naive())?,
    };

    let (mut store, _config, load_warning) = open_store(options.data.as_deref())?;
    let applied = store.add(&draft)?;
    let task = applied.value;

    let mut human = HumanOutput::new(format!("Added task {}", task.id));
    human.push_summary("text", &task.text);
    human.push_summary("date", task.date.to_string());
    push_storage_warnings(&mut human, load_warning, applied.save_error);

    emit_success(output, "add", &task, Some(&human))
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let output = OutputOptions {
        json: options.json,
        quiet: options.quiet,
    };

    let filter: Filter = options.filter.parse()?;
    let (store, _config, load_warning) = open_store(options.data.as_deref())?;

    let rows = render::list_rows(query::filtered(store.all(), filter));

    let mut human = HumanOutput::new(format!("Tasks ({filter})"));
    if rows.is_empty() {
        human.push_detail(EMPTY_PLACEHOLDER);
    } else {
        for row in &rows {
            let mark = if row.completed { "x" } else { " " };
            human.push_detail(format!(
                "[{mark}] {:<14} {:<7} {}",
                row.id, row.date_label, row.text
            ));
        }
    }
    push_storage_warnings(&mut human, load_warning, None);

    emit_success(output, "list", &rows, Some(&human))
}

pub fn run_done(options: DoneOptions) -> Result<()> {
    let output = OutputOptions {
        json: options.json,
        quiet: options.quiet,
    };

    let (mut store, _config, load_warning) = open_store(options.data.as_deref())?;
    let applied = store.toggle(options.id)?;
    let task = applied.value;

    let state = if task.completed { "completed" } else { "pending" };
    let mut human = HumanOutput::new(format!("Task {} is now {state}", task.id));
    human.push_summary("text", &task.text);
    push_storage_warnings(&mut human, load_warning, applied.save_error);

    emit_success(output, "done", &task, Some(&human))
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let output = OutputOptions {
        json: options.json,
        quiet: options.quiet,
    };

    if options.text.is_none() && options.date.is_none() {
        return Err(Error::InvalidArgument(
            "nothing to change: pass --text and/or --date".to_string(),
        ));
    }

    let (mut store, _config, load_warning) = open_store(options.data.as_deref())?;
    let current = store
        .get(options.id)
        .cloned()
        .ok_or(Error::TaskNotFound(options.id))?;

    // Unspecified fields keep their current value; the merged pair passes
    // the same validation as add.
    let text = options.text.as_deref().unwrap_or(&current.text);
    let date = match options.date.as_deref() {
        Some(raw) => crate::task::parse_date(raw)?,
        None => current.date,
    };
    let draft = TaskDraft::new(text, date)?;

    let applied = store.update(options.id, &draft)?;
    let task = applied.value;

    let mut human = HumanOutput::new(format!("Updated task {}", task.id));
    human.push_summary("text", &task.text);
    human.push_summary("date", task.date.to_string());
    push_storage_warnings(&mut human, load_warning, applied.save_error);

    emit_success(output, "edit", &task, Some(&human))
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let output = OutputOptions {
        json: options.json,
        quiet: options.quiet,
    };

    let (mut store, _config, load_warning) = open_store(options.data.as_deref())?;
    if store.get(options.id).is_none() {
        return Err(Error::TaskNotFound(options.id));
    }
    if !options.yes {
        // Deletion is confirm-gated; the caller decides how to prompt.
        return Err(Error::ConfirmationRequired(options.id));
    }

    let applied = store.remove(options.id)?;
    let task = applied.value;

    let mut human = HumanOutput::new(format!("Deleted task {}", task.id));
    human.push_summary("text", &task.text);
    push_storage_warnings(&mut human, load_warning, applied.save_error);

    emit_success(output, "rm", &task, Some(&human))
}

pub fn run_stats(options: StatsOptions) -> Result<()> {
    let output = OutputOptions {
        json: options.json,
        quiet: options.quiet,
    };

    let (store, _config, load_warning) = open_store(options.data.as_deref())?;
    let stats = query::stats(store.all());

    let mut human = HumanOutput::new("Task counts");
    human.push_summary("total", stats.total.to_string());
    human.push_summary("completed", stats.completed.to_string());
    human.push_summary("pending", stats.pending.to_string());
    push_storage_warnings(&mut human, load_warning, None);

    emit_success(output, "stats", &stats, Some(&human))
}
