//! `pml queue` - prioritized work queue for the scoped project.

use std::str::FromStr;

use anyhow::Result;

use pm_engine::{QueueOptions, QueueSort};

use crate::cli::QueueArgs;
use crate::config::Workspace;
use crate::format::{self, output::QueueView, text};

/// Execute the queue command.
///
/// # Errors
///
/// Returns an error if scope cannot be resolved or the sort name is
/// unknown.
pub fn execute(args: &QueueArgs, project: Option<&str>, json: bool) -> Result<()> {
    let sort = match args.sort.as_deref() {
        Some(s) => QueueSort::from_str(s)?,
        None => QueueSort::default(),
    };

    let workspace = Workspace::open(project)?;
    let queue = workspace.service.work_queue(&QueueOptions {
        sort,
        limit: args.limit,
        owner: args.owner.clone(),
    })?;

    if json {
        format::print_json(&QueueView {
            project_id: queue.project_id,
            sort: sort.as_str().to_string(),
            candidate_count: queue.candidate_count,
            items: queue.items,
        })?;
        return Ok(());
    }

    if queue.items.is_empty() {
        println!("Queue for '{}' is empty.", queue.project_id);
        return Ok(());
    }
    println!("Work queue for '{}' (sort: {}):", queue.project_id, sort.as_str());
    for (i, item) in queue.items.iter().enumerate() {
        println!("{}", text::queue_line(i + 1, item));
    }
    Ok(())
}
