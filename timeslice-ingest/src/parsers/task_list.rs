//! Task-list documents: one `id/arrival/cost/priority/quantum` record per line.

use anyhow::{Context, Result};
use timeslice_core::{Registry, Task};

/// Parse a whole task-list document, in input order.
///
/// Blank lines are skipped; any other line must be a well-formed record.
/// A malformed record is fatal — no partial task set is returned.
pub fn parse_task_list(text: &str) -> Result<Vec<Task>> {
    let mut tasks = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let task: Task = line
            .parse()
            .with_context(|| format!("line {}", lineno + 1))?;
        tasks.push(task);
    }

    Ok(tasks)
}

/// Parse a document straight into a loaded registry.
pub fn load_registry(text: &str) -> Result<Registry> {
    Ok(Registry::from_tasks(parse_task_list(text)?))
}
