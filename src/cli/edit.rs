//! taskgrid edit command implementation
//!
//! Applies partial updates to an existing task. Editing an id that does
//! not exist is not an error; the report carries `changed: false`.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{parse_due_date, Priority, Status, Task};

/// Options for the edit command
pub struct EditOptions {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub due: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub data_file: Option<PathBuf>,
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct EditReport {
    id: u64,
    changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<Task>,
}

pub fn run(options: EditOptions) -> Result<()> {
    // Validate field values before touching the store.
    let due_date = options.due.as_deref().map(parse_due_date).transpose()?;
    let status = options
        .status
        .as_deref()
        .map(str::parse::<Status>)
        .transpose()?;
    let priority = options
        .priority
        .as_deref()
        .map(str::parse::<Priority>)
        .transpose()?;
    if let Some(name) = options.name.as_deref() {
        if name.trim().is_empty() {
            return Err(Error::InvalidArgument("task name must not be empty".to_string()));
        }
    }

    let mut store = super::open_store(options.data_file, &options.config)?;

    let Some(existing) = store.get(options.id).cloned() else {
        let report = EditReport {
            id: options.id,
            changed: false,
            task: None,
        };
        let human = HumanOutput::new(format!("No task with id #{}", options.id));
        return emit_success(
            OutputOptions {
                json: options.json,
                quiet: options.quiet,
            },
            "edit",
            &report,
            Some(&human),
        );
    };

    let updated = Task {
        id: existing.id,
        name: options.name.map(|n| n.trim().to_string()).unwrap_or(existing.name),
        description: options.description.unwrap_or(existing.description),
        due_date: due_date.unwrap_or(existing.due_date),
        status: status.unwrap_or(existing.status),
        priority: priority.unwrap_or(existing.priority),
    };
    let changed = store.edit(updated.clone())?;

    tracing::info!(id = updated.id, "task edited");

    let report = EditReport {
        id: updated.id,
        changed,
        task: Some(updated.clone()),
    };

    let mut human = HumanOutput::new(format!("Updated task #{}", updated.id));
    human.push_summary("name", &updated.name);
    human.push_summary("due", updated.due_date.to_string());
    human.push_summary("status", updated.status.label());
    human.push_summary("priority", updated.priority.label());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "edit",
        &report,
        Some(&human),
    )
}
