//! `pml projects` - list registered projects.

use anyhow::Result;

use crate::config;
use crate::format::{self, output::ProjectView};

/// Execute the projects command.
///
/// # Errors
///
/// Returns an error if the registry cannot be read.
pub fn execute(json: bool) -> Result<()> {
    let registry = config::load_registry()?;

    if json {
        let views: Vec<ProjectView> = registry
            .into_iter()
            .map(|project| {
                let issue_count = pm_engine::jsonl::load(&config::issues_path(&project))
                    .map(|issues| issues.len())
                    .ok();
                ProjectView {
                    project,
                    issue_count,
                }
            })
            .collect();
        format::print_json(&views)?;
        return Ok(());
    }

    if registry.is_empty() {
        println!("No projects registered. Run 'pml init' inside a project directory.");
        return Ok(());
    }

    for project in &registry {
        println!(
            "{}  {}  {}",
            project.project_id,
            project.name,
            project.absolute_path.display()
        );
    }
    Ok(())
}
