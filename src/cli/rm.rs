//! taskgrid rm command implementation
//!
//! Removes a task by id. Deleting an id that is already gone succeeds
//! with `deleted: false`.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

/// Options for the rm command
pub struct RmOptions {
    pub id: u64,
    pub data_file: Option<PathBuf>,
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct RmReport {
    id: u64,
    deleted: bool,
    remaining: usize,
}

pub fn run(options: RmOptions) -> Result<()> {
    let mut store = super::open_store(options.data_file, &options.config)?;

    let deleted = store.delete(options.id)?;
    if deleted {
        tracing::info!(id = options.id, "task deleted");
    }

    let report = RmReport {
        id: options.id,
        deleted,
        remaining: store.list().len(),
    };

    let human = if deleted {
        HumanOutput::new(format!("Deleted task #{}", options.id))
    } else {
        HumanOutput::new(format!("No task with id #{}", options.id))
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "rm",
        &report,
        Some(&human),
    )
}
