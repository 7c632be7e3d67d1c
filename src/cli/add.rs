//! taskgrid add command implementation
//!
//! Creates a new task and persists the updated blob.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{parse_due_date, Priority, Status, Task};

/// Options for the add command
pub struct AddOptions {
    pub name: String,
    pub description: String,
    pub due: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub data_file: Option<PathBuf>,
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct AddReport<'a> {
    task: &'a Task,
    total: usize,
}

pub fn run(options: AddOptions) -> Result<()> {
    let name = options.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::InvalidArgument("task name must not be empty".to_string()));
    }

    let due_date = parse_due_date(&options.due)?;
    let status: Status = match options.status.as_deref() {
        Some(raw) => raw.parse()?,
        None => options.config.defaults.status(),
    };
    let priority: Priority = match options.priority.as_deref() {
        Some(raw) => raw.parse()?,
        None => options.config.defaults.priority(),
    };

    let mut store = super::open_store(options.data_file, &options.config)?;

    let task = Task {
        id: store.next_id(),
        name,
        description: options.description,
        due_date,
        status,
        priority,
    };
    store.add(task.clone())?;

    tracing::info!(id = task.id, name = %task.name, "task added");

    let report = AddReport {
        task: &task,
        total: store.list().len(),
    };

    let mut human = HumanOutput::new(format!("Added task #{}", task.id));
    human.push_summary("name", &task.name);
    human.push_summary("due", task.due_date.to_string());
    human.push_summary("status", task.status.label());
    human.push_summary("priority", task.priority.label());
    human.push_next_step("taskgrid list".to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &report,
        Some(&human),
    )
}
