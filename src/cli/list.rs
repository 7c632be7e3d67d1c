//! taskgrid list command implementation
//!
//! Prints the task table, optionally narrowed by a name search.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::Task;

/// Options for the list command
pub struct ListOptions {
    pub query: Option<String>,
    pub data_file: Option<PathBuf>,
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct ListReport<'a> {
    total: usize,
    shown: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    tasks: Vec<&'a Task>,
}

pub fn run(options: ListOptions) -> Result<()> {
    let store = super::open_store(options.data_file, &options.config)?;

    let query = options.query.as_deref().unwrap_or("");
    let tasks = store.filter(query);

    let report = ListReport {
        total: store.list().len(),
        shown: tasks.len(),
        query: options.query.as_deref(),
        tasks,
    };

    let mut human = HumanOutput::new(format!(
        "{} task(s){}",
        report.shown,
        options
            .query
            .as_deref()
            .map(|q| format!(" matching '{q}'"))
            .unwrap_or_default()
    ));
    for task in &report.tasks {
        human.push_detail(format!(
            "#{} {} | due {} | {} | {}",
            task.id, task.name, task.due_date, task.status, task.priority
        ));
    }
    if report.shown == 0 && report.total > 0 {
        human.push_next_step("taskgrid list (without --query) to see all tasks".to_string());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &report,
        Some(&human),
    )
}
