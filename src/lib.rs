//! tuido - dated todo list for the terminal
//!
//! A small task manager with a single JSON data file, a scriptable CLI, and
//! an interactive terminal UI with list and month-calendar views.
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `config.toml`
//! - `error`: Error types and result aliases
//! - `task`: Task records and the write-through task store
//! - `storage`: JSON file persistence with atomic writes
//! - `query`: Filtering and aggregate counts
//! - `render`: List rows, date labels, and text sanitizing
//! - `calendar`: Month references and the fixed 6x7 grid
//! - `output`: Human and JSON output envelopes
//! - `ui`: Interactive terminal front end

pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod query;
pub mod render;
pub mod storage;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
