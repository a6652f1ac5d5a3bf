//! `pml create` - create a new issue in the scoped project.

use std::str::FromStr;

use anyhow::Result;

use pm_engine::{IssueDraft, IssueType, Priority};

use crate::cli::CreateArgs;
use crate::config::Workspace;
use crate::format::{self, text};

/// Execute the create command.
///
/// # Errors
///
/// Returns an error if scope cannot be resolved, a field fails to
/// parse, or the draft fails validation.
pub fn execute(args: CreateArgs, project: Option<&str>, json: bool) -> Result<()> {
    let issue_type = match args.issue_type.as_deref() {
        Some(t) => IssueType::from_str(t)?,
        None => IssueType::default(),
    };
    let priority = match args.priority.as_deref() {
        Some(p) => Priority::from_str(p)?,
        None => Priority::default(),
    };

    let mut workspace = Workspace::open(project)?;
    let issue = workspace.service.create_issue(IssueDraft {
        project_id: None,
        title: args.title,
        description: args.description,
        issue_type,
        priority,
        owner: args.owner,
        module: args.module,
        dependencies: args.dependencies,
    })?;
    workspace.save()?;

    if json {
        format::print_json(&issue)?;
    } else {
        println!("Created {}", text::issue_line(&issue));
    }
    Ok(())
}
