//! Command-line interface for taskgrid
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::storage::Storage;
use crate::store::TaskStore;

mod add;
mod edit;
mod list;
mod rm;

/// taskgrid - terminal task list manager
///
/// Keeps a small list of tasks in a local JSON blob and lets you
/// create, edit, delete, search, and reprioritize them from the
/// command line or an interactive table view.
#[derive(Parser, Debug)]
#[command(name = "taskgrid")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the task data file (defaults to the platform data dir)
    #[arg(long, global = true, env = "TASKGRID_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Path to a taskgrid.toml config file
    #[arg(long, global = true, env = "TASKGRID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tasks, optionally filtered by a name search
    List {
        /// Case-insensitive substring to match against task names
        #[arg(short = 'q', long)]
        query: Option<String>,
    },

    /// Add a new task
    Add {
        /// Task name
        name: String,

        /// What the task is about
        #[arg(short, long)]
        description: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,

        /// Status: Pending, "In Progress", or Completed
        #[arg(long)]
        status: Option<String>,

        /// Priority: Low, Medium, or High
        #[arg(long)]
        priority: Option<String>,
    },

    /// Edit fields of an existing task
    Edit {
        /// Task id
        id: u64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// New status
        #[arg(long)]
        status: Option<String>,

        /// New priority
        #[arg(long)]
        priority: Option<String>,
    },

    /// Remove a task
    Rm {
        /// Task id
        id: u64,
    },

    /// Open the interactive table view
    Ui,
}

/// Open the task store honoring flag > env > config > platform default.
pub(crate) fn open_store(data_file: Option<PathBuf>, config: &Config) -> Result<TaskStore> {
    let explicit = data_file.or_else(|| config.data_file.clone());
    let storage = Storage::resolve(explicit)?;
    Ok(TaskStore::open(storage))
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let config = Config::load_or_default(self.config.clone())?;

        match self.command {
            Commands::List { query } => list::run(list::ListOptions {
                query,
                data_file: self.data_file,
                config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Add {
                name,
                description,
                due,
                status,
                priority,
            } => add::run(add::AddOptions {
                name,
                description,
                due,
                status,
                priority,
                data_file: self.data_file,
                config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Edit {
                id,
                name,
                description,
                due,
                status,
                priority,
            } => edit::run(edit::EditOptions {
                id,
                name,
                description,
                due,
                status,
                priority,
                data_file: self.data_file,
                config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Rm { id } => rm::run(rm::RmOptions {
                id,
                data_file: self.data_file,
                config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Ui => {
                let store = open_store(self.data_file, &config)?;
                crate::ui::run(store, &config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        // Catches flag collisions (clap only asserts these at runtime).
        Cli::command().debug_assert();
    }

    #[test]
    fn short_query_flag_reaches_list() {
        let cli = Cli::try_parse_from(["taskgrid", "list", "-q", "report"]).expect("parse");
        match cli.command {
            Commands::List { query } => assert_eq!(query.as_deref(), Some("report")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn quiet_is_long_only() {
        let cli = Cli::try_parse_from(["taskgrid", "--quiet", "rm", "1"]).expect("parse");
        assert!(cli.quiet);
    }
}
