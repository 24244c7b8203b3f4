//! Month calendar projection.
//!
//! A month is always rendered as a fixed 6-row by 7-column grid (42 day
//! cells) starting on the Sunday on or before the first of the month, so
//! the layout is uniform whether the month spans 4, 5, or 6 weeks. Tasks
//! are bucketed into cells by exact date; each cell shows at most a fixed
//! number of tasks plus a `+N` overflow count.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{Error, Result};
use crate::task::Task;

/// Cells in the fixed month grid (6 weeks of 7 days)
pub const GRID_CELLS: usize = 42;

/// Column header abbreviations, Sunday first
pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Default cap on tasks shown per day cell
pub const DEFAULT_CELL_TASKS: usize = 3;

/// Years accepted in a month reference. Keeps the full 42-cell grid,
/// including its leading and trailing weeks, inside chrono's date range.
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// A calendar month reference with ±1 month navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::InvalidMonth(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Month containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse a user-supplied `YYYY-MM` reference
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidMonth(value.to_string());
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    pub fn first_day(&self) -> NaiveDate {
        // Year and month are bounded at construction, so this is always Some.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Previous month, clamped at the first representable month.
    pub fn prev(&self) -> MonthRef {
        if self.month == 1 {
            if self.year == MIN_YEAR {
                return *self;
            }
            MonthRef {
                year: self.year - 1,
                month: 12,
            }
        } else {
            MonthRef {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Next month, clamped at the last representable month.
    pub fn next(&self) -> MonthRef {
        if self.month == 12 {
            if self.year == MAX_YEAR {
                return *self;
            }
            MonthRef {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthRef {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Display label, e.g. "March 2024"
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// One day cell of the grid
#[derive(Debug)]
pub struct CalendarCell<'a> {
    pub date: NaiveDate,
    /// False for leading/trailing cells belonging to adjacent months
    pub in_month: bool,
    pub today: bool,
    /// Tasks shown in the cell, insertion order, capped
    pub shown: Vec<&'a Task>,
    /// Number of additional tasks hidden behind the `+N` marker
    pub overflow: usize,
}

/// A fully projected month grid
#[derive(Debug)]
pub struct CalendarGrid<'a> {
    pub month: MonthRef,
    pub cells: Vec<CalendarCell<'a>>,
}

impl<'a> CalendarGrid<'a> {
    /// Project the full (unfiltered) task collection onto a month grid.
    ///
    /// `today` is caller-supplied so the projection stays pure.
    pub fn for_month(
        month: MonthRef,
        today: NaiveDate,
        tasks: &'a [Task],
        cell_tasks: usize,
    ) -> Self {
        let first = month.first_day();
        let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);

        let cells = (0..GRID_CELLS as i64)
            .map(|offset| {
                let date = start + Duration::days(offset);
                let day_tasks: Vec<&Task> =
                    tasks.iter().filter(|t| t.date == date).collect();
                let overflow = day_tasks.len().saturating_sub(cell_tasks);
                let shown = day_tasks.into_iter().take(cell_tasks).collect();
                CalendarCell {
                    date,
                    in_month: month.contains(date),
                    today: date == today,
                    shown,
                    overflow,
                }
            })
            .collect();

        Self { month, cells }
    }

    /// Cells of one grid row (0..6)
    pub fn week(&self, row: usize) -> &[CalendarCell<'a>] {
        &self.cells[row * 7..(row + 1) * 7]
    }
}
