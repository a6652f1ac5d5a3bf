//! `pml blocked` - blocked issues with their dependency picture.

use anyhow::Result;

use crate::config::Workspace;
use crate::format::{self, output::IssueDetails, text};

/// Execute the blocked command.
///
/// Unblockable issues (every dependency done) come first.
///
/// # Errors
///
/// Returns an error if scope cannot be resolved.
pub fn execute(project: Option<&str>, json: bool) -> Result<()> {
    let workspace = Workspace::open(project)?;
    let blocked = workspace.service.blocked_issues()?;

    if json {
        let views: Vec<IssueDetails> = blocked
            .into_iter()
            .map(|(issue, report)| IssueDetails { issue, report })
            .collect();
        format::print_json(&views)?;
        return Ok(());
    }

    if blocked.is_empty() {
        println!("No blocked issues.");
        return Ok(());
    }
    for (issue, report) in &blocked {
        let tag = if report.ready_to_work {
            " (unblockable)"
        } else {
            ""
        };
        println!("{}{tag}", text::issue_line(issue));
        if let Some(reason) = &issue.planning.blocker_reason {
            println!("    reason: {reason}");
        }
    }
    Ok(())
}
