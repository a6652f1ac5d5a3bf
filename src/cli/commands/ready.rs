//! `pml ready` - issues whose dependencies are all done.

use anyhow::Result;

use crate::config::Workspace;
use crate::format::{self, output::IssueDetails, text};

/// Execute the ready command.
///
/// # Errors
///
/// Returns an error if scope cannot be resolved.
pub fn execute(project: Option<&str>, json: bool) -> Result<()> {
    let workspace = Workspace::open(project)?;
    let ready = workspace.service.ready_issues()?;

    if json {
        let views: Vec<IssueDetails> = ready
            .into_iter()
            .map(|(issue, report)| IssueDetails { issue, report })
            .collect();
        format::print_json(&views)?;
        return Ok(());
    }

    if ready.is_empty() {
        println!("Nothing is ready to pick up.");
        return Ok(());
    }
    for (issue, _) in &ready {
        println!("{}", text::issue_line(issue));
    }
    Ok(())
}
