//! `pml show` - full issue details plus dependency picture.

use anyhow::Result;

use crate::cli::ShowArgs;
use crate::config::Workspace;
use crate::format::{self, output::IssueDetails, text};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error for unknown keys or out-of-scope issues.
pub fn execute(args: &ShowArgs, project: Option<&str>, json: bool) -> Result<()> {
    let workspace = Workspace::open(project)?;
    let issue = workspace.service.get_issue(&args.key)?;
    let report = workspace.service.dependency_report(&args.key)?;

    if json {
        format::print_json(&IssueDetails { issue, report })?;
    } else {
        print!("{}", text::issue_details(&issue));
        println!();
        print!("{}", text::dependency_report(&report));
    }
    Ok(())
}
