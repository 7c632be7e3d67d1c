//! taskgrid - terminal task-table manager
//!
//! This library provides the core functionality for the taskgrid CLI/TUI,
//! a table-style manager for short-lived task records persisted to a single
//! JSON blob on disk.
//!
//! # Core Concepts
//!
//! - **Tasks**: records with a name, description, due date, status, and priority
//! - **Store**: the in-memory owner of the task collection and sole mutator;
//!   every mutation rewrites the persisted blob wholesale
//! - **Seed dataset**: bundled default tasks used on first run or when the
//!   blob cannot be parsed
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `taskgrid.toml`
//! - `error`: error types and result aliases
//! - `task`: the task record and its status/priority enums
//! - `store`: the task collection store
//! - `storage`: blob location and atomic file I/O
//! - `output`: shared human/JSON output formatting
//! - `ui`: the ratatui table view and editor dialogs

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod storage;
pub mod store;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
