//! `pml list` - list issues in the scoped project.

use std::str::FromStr;

use anyhow::Result;

use pm_engine::{Issue, IssueType, Status};

use crate::cli::ListArgs;
use crate::config::Workspace;
use crate::format::{self, output::ListView, text};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if scope cannot be resolved or a filter value
/// fails to parse.
pub fn execute(args: &ListArgs, project: Option<&str>, json: bool) -> Result<()> {
    let status_filter = args.status.as_deref().map(Status::from_str).transpose()?;
    let type_filter = args
        .issue_type
        .as_deref()
        .map(IssueType::from_str)
        .transpose()?;

    let workspace = Workspace::open(project)?;
    let scope = workspace.service.resolve_scope()?;
    let issues: Vec<Issue> = workspace
        .service
        .list_issues()?
        .into_iter()
        .filter(|i| status_filter.is_none_or(|s| i.status == s))
        .filter(|i| type_filter.is_none_or(|t| i.issue_type == t))
        .filter(|i| {
            args.owner
                .as_deref()
                .is_none_or(|o| i.owner.as_deref() == Some(o))
        })
        .collect();

    if json {
        format::print_json(&ListView {
            scope,
            total: issues.len(),
            issues,
        })?;
        return Ok(());
    }

    if issues.is_empty() {
        println!("No matching issues in project '{}'.", scope.project_id);
        return Ok(());
    }
    for issue in &issues {
        println!("{}", text::issue_line(issue));
    }
    println!("\n{} issue(s) in '{}'", issues.len(), scope.project_id);
    Ok(())
}
