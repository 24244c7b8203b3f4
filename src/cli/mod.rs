//! Command-line interface for tuido
//!
//! This module defines the CLI structure using clap derive macros.
//! Command implementations live in the submodules.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::storage::Storage;
use crate::task::TaskStore;

pub mod calendar;
pub mod task;

/// tuido - dated todos with list and calendar views
///
/// Tasks live in a single JSON file; add, complete, edit and delete them
/// from the command line or the interactive terminal UI (`tuido ui`).
#[derive(Parser, Debug)]
#[command(name = "tuido")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the todos data file (defaults to the platform data directory)
    #[arg(long, global = true, env = "TUIDO_DATA")]
    pub data: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task description
        text: String,

        /// Due date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List tasks
    List {
        /// Filter: all, completed, or pending
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Toggle completion of a task
    Done {
        /// Task id
        id: i64,
    },

    /// Edit a task's text and/or date
    Edit {
        /// Task id
        id: i64,

        /// New task description
        #[arg(long)]
        text: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: i64,

        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },

    /// Show total/completed/pending counts
    Stats,

    /// Show a month calendar with tasks per day
    Calendar {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Open the interactive terminal UI
    Ui,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Add { text, date } => task::run_add(task::AddOptions {
                text,
                date,
                data: self.data,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::List { filter } => task::run_list(task::ListOptions {
                filter,
                data: self.data,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Done { id } => task::run_done(task::DoneOptions {
                id,
                data: self.data,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Edit { id, text, date } => task::run_edit(task::EditOptions {
                id,
                text,
                date,
                data: self.data,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Rm { id, yes } => task::run_rm(task::RmOptions {
                id,
                yes,
                data: self.data,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Stats => task::run_stats(task::StatsOptions {
                data: self.data,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Calendar { month } => calendar::run(calendar::CalendarOptions {
                month,
                data: self.data,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Ui => crate::ui::run(self.data),
        }
    }
}

/// Open the task store for a command, resolving the data file from the
/// `--data` flag, the config file, or the platform data directory.
///
/// Returns the store together with the load warning, if the persisted data
/// had to be discarded.
pub(crate) fn open_store(data: Option<&std::path::Path>) -> Result<(TaskStore, Config, Option<String>)> {
    let config = Config::load()?;
    let storage = Storage::resolve(data, &config)?;
    let (store, warning) = TaskStore::open(storage);
    Ok((store, config, warning))
}
