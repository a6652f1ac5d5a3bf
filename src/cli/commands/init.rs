//! `pml init` - register the current directory as a project.

use std::fs;

use anyhow::{Context, Result, bail};
use tracing::info;

use pm_engine::Project;

use crate::cli::InitArgs;
use crate::config;
use crate::format::{self, output::ProjectView};

/// Execute the init command.
///
/// Registers the working directory in the machine-wide registry and
/// creates an empty `.pm/issues.jsonl`. Running it again for the
/// same directory refreshes the registration.
///
/// # Errors
///
/// Returns an error if the directory name yields an empty ID, the
/// project ID is already registered at a different directory, or the
/// registry cannot be written.
pub fn execute(args: &InitArgs, json: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("determining working directory")?;

    let name = resolve_name(args, &cwd)?;
    let slug = args.slug.clone().unwrap_or_else(|| name.clone());
    let project_id = config::slugify(&name);
    if project_id.is_empty() {
        bail!("project name '{name}' produces an empty ID");
    }

    let mut registry = config::load_registry()?;
    if let Some(other) = registry
        .iter()
        .find(|p| p.project_id != project_id && p.absolute_path == cwd)
    {
        bail!(
            "directory already registered as project '{}'",
            other.project_id
        );
    }

    let project = Project {
        project_id: project_id.clone(),
        name,
        slug,
        absolute_path: cwd.clone(),
    };
    match registry.iter_mut().find(|p| p.project_id == project_id) {
        Some(existing) if existing.absolute_path == cwd => *existing = project.clone(),
        Some(existing) => {
            bail!(
                "project '{}' is already registered at {}",
                project_id,
                existing.absolute_path.display()
            );
        }
        None => registry.push(project.clone()),
    }
    config::save_registry(&registry)?;

    let issues_path = config::issues_path(&project);
    if !issues_path.exists() {
        if let Some(parent) = issues_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&issues_path, "")
            .with_context(|| format!("creating {}", issues_path.display()))?;
    }

    info!(project_id = %project.project_id, path = %cwd.display(), "registered project");

    if json {
        format::print_json(&ProjectView {
            project,
            issue_count: Some(0),
        })?;
    } else {
        println!(
            "Registered project '{}' ({}) at {}",
            project.name,
            project.project_id,
            cwd.display()
        );
    }
    Ok(())
}

fn resolve_name(args: &InitArgs, cwd: &std::path::Path) -> Result<String> {
    if let Some(name) = &args.name {
        if !name.trim().is_empty() {
            return Ok(name.trim().to_string());
        }
    }
    cwd.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .context("cannot derive a project name from the filesystem root")
}
