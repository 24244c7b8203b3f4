//! tuido calendar command implementation.
//!
//! Renders the fixed 6x7 month grid as text, with a per-day task section
//! below the grid. Days carry a `.` marker when tasks exist and a `>`
//! marker for today.

use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::calendar::{CalendarGrid, MonthRef, WEEKDAY_HEADERS};
use crate::cli::open_store;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::render;

pub struct CalendarOptions {
    pub month: Option<String>,
    pub data: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct CalendarReport {
    month: String,
    label: String,
    cells: Vec<CellReport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CellReport {
    date: NaiveDate,
    in_month: bool,
    today: bool,
    tasks: Vec<CellTaskReport>,
    overflow: usize,
}

#[derive(Serialize)]
struct CellTaskReport {
    id: i64,
    text: String,
    completed: bool,
}

pub fn run(options: CalendarOptions) -> Result<()> {
    let output = OutputOptions {
        json: options.json,
        quiet: options.quiet,
    };

    let today = Local::now().date_naive();
    let month = match options.month.as_deref() {
        Some(raw) => MonthRef::parse(raw)?,
        None => MonthRef::containing(today),
    };

    let (store, config, load_warning) = open_store(options.data.as_deref())?;
    let grid = CalendarGrid::for_month(month, today, store.all(), config.calendar.cell_tasks);

    if options.json {
        let report = CalendarReport {
            month: format!("{:04}-{:02}", month.year, month.month),
            label: month.label(),
            cells: grid
                .cells
                .iter()
                .map(|cell| CellReport {
                    date: cell.date,
                    in_month: cell.in_month,
                    today: cell.today,
                    tasks: cell
                        .shown
                        .iter()
                        .map(|task| CellTaskReport {
                            id: task.id,
                            text: render::sanitize_text(&task.text),
                            completed: task.completed,
                        })
                        .collect(),
                    overflow: cell.overflow,
                })
                .collect(),
        };

        let mut human = HumanOutput::new(month.label());
        if let Some(warning) = load_warning {
            human.push_warning(warning);
        }
        return emit_success(output, "calendar", &report, Some(&human));
    }

    if options.quiet {
        return Ok(());
    }

    print_grid(&grid);
    if let Some(warning) = load_warning {
        eprintln!("warning: {warning}");
    }
    Ok(())
}

fn print_grid(grid: &CalendarGrid<'_>) {
    println!("{:^29}", grid.month.label());
    println!();
    let header: Vec<String> = WEEKDAY_HEADERS.iter().map(|d| format!("{d:>4}")).collect();
    println!("{}", header.join(""));

    for row in 0..6 {
        let mut line = String::new();
        for cell in grid.week(row) {
            let today_mark = if cell.today { '>' } else { ' ' };
            let busy = !cell.shown.is_empty() || cell.overflow > 0;
            let task_mark = if busy { '.' } else { ' ' };
            line.push_str(&format!("{today_mark}{:>2}{task_mark}", cell.date.day()));
        }
        println!("{}", line.trim_end());
    }

    let mut day_lines = Vec::new();
    for cell in &grid.cells {
        if !cell.in_month || cell.shown.is_empty() {
            continue;
        }
        let label = render::date_label(cell.date);
        for (idx, task) in cell.shown.iter().enumerate() {
            let mark = if task.completed { "x" } else { " " };
            let prefix = if idx == 0 {
                format!("{label:<7}")
            } else {
                " ".repeat(7)
            };
            day_lines.push(format!(
                "  {prefix} [{mark}] {}",
                render::sanitize_text(&task.text)
            ));
        }
        if cell.overflow > 0 {
            day_lines.push(format!("  {} +{} more", " ".repeat(7), cell.overflow));
        }
    }

    if !day_lines.is_empty() {
        println!();
        for line in day_lines {
            println!("{line}");
        }
    }
}
