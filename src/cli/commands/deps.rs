//! `pml deps` - dependency analysis for one issue.

use anyhow::Result;

use crate::cli::DepsArgs;
use crate::config::Workspace;
use crate::format::{self, text};

/// Execute the deps command.
///
/// # Errors
///
/// Returns an error for unknown keys or out-of-scope issues.
pub fn execute(args: &DepsArgs, project: Option<&str>, json: bool) -> Result<()> {
    let workspace = Workspace::open(project)?;
    let report = workspace.service.dependency_report(&args.key)?;

    if json {
        format::print_json(&report)?;
    } else {
        println!("{}", args.key);
        print!("{}", text::dependency_report(&report));
    }
    Ok(())
}
