//! `pml status` - transition an issue through the state machine.

use std::str::FromStr;

use anyhow::Result;

use pm_engine::Status;

use crate::cli::StatusArgs;
use crate::config::Workspace;
use crate::format::{self, output::TransitionView};

/// Execute the status command.
///
/// # Errors
///
/// Returns an error for unknown statuses, illegal transitions, a
/// missing blocker reason, or out-of-scope issues.
pub fn execute(args: &StatusArgs, project: Option<&str>, json: bool) -> Result<()> {
    let requested = Status::from_str(&args.status)?;

    let mut workspace = Workspace::open(project)?;
    let outcome =
        workspace
            .service
            .update_status(&args.key, requested, args.reason.as_deref())?;
    workspace.save()?;

    if json {
        format::print_json(&TransitionView {
            key: outcome.issue.key.clone(),
            old_status: outcome.old_status,
            new_status: outcome.new_status,
            ready_to_work: outcome.report.ready_to_work,
            blocker_reason: outcome.issue.planning.blocker_reason.clone(),
        })?;
        return Ok(());
    }

    println!(
        "{}: {} -> {}",
        outcome.issue.key, outcome.old_status, outcome.new_status
    );
    if outcome.new_status == Status::Blocked {
        if let Some(reason) = &outcome.issue.planning.blocker_reason {
            println!("Blocked: {reason}");
        }
    } else if !outcome.report.ready_to_work {
        println!("Note: not all dependencies are done yet.");
    }
    Ok(())
}
