//! Configuration for `pm_lite`.
//!
//! A machine-wide registry of projects lives under `PM_LITE_HOME`
//! (default `~/.pm_lite`) as `registry.json`. Each project keeps its
//! own issues in `<project>/.pm/issues.jsonl`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use pm_engine::{InMemoryStore, IssueLifecycleService, Project, ServiceConfig};

/// Directory name under the project root holding tracker data.
pub const PM_DIR: &str = ".pm";

/// Issues file name inside the `.pm` directory.
pub const ISSUES_FILE: &str = "issues.jsonl";

/// Resolve the `pm_lite` home directory.
///
/// `PM_LITE_HOME` wins; otherwise `$HOME/.pm_lite`.
#[must_use]
pub fn pm_home() -> PathBuf {
    if let Ok(home) = std::env::var("PM_LITE_HOME") {
        if !home.trim().is_empty() {
            return PathBuf::from(home);
        }
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".pm_lite")
}

/// Path of the project registry file.
#[must_use]
pub fn registry_path() -> PathBuf {
    pm_home().join("registry.json")
}

/// Issues file for a registered project.
#[must_use]
pub fn issues_path(project: &Project) -> PathBuf {
    project.absolute_path.join(PM_DIR).join(ISSUES_FILE)
}

/// Load the project registry. A missing file is an empty registry.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_registry() -> Result<Vec<Project>> {
    let path = registry_path();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("reading registry at {}", path.display()))?;
    let projects: Vec<Project> = serde_json::from_str(&content)
        .with_context(|| format!("parsing registry at {}", path.display()))?;
    Ok(projects)
}

/// Write the project registry, creating the home directory if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_registry(projects: &[Project]) -> Result<()> {
    let path = registry_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(projects)?;
    fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    debug!(path = %path.display(), count = projects.len(), "saved registry");
    Ok(())
}

/// Derive a registry ID from a project name: lowercase, runs of
/// non-alphanumerics collapsed to single hyphens.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut out = String::new();
    let mut last_hyphen = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            out.push('-');
            last_hyphen = true;
        }
    }
    out.trim_end_matches('-').to_string()
}

/// An opened workspace: the lifecycle service plus the path its
/// issues persist to.
pub struct Workspace {
    pub service: IssueLifecycleService<InMemoryStore>,
    issues_path: PathBuf,
}

impl Workspace {
    /// Open the workspace for the current call.
    ///
    /// Loads the registry, resolves scope (explicit `--project` /
    /// `PM_PROJECT_ID` override first, then working directory, then
    /// sole project), and loads that project's issues file. A
    /// registered project with no issues file yet opens empty.
    ///
    /// # Errors
    ///
    /// Returns an error when scope cannot be resolved or the issues
    /// file is unreadable.
    pub fn open(project_override: Option<&str>) -> Result<Self> {
        let registry = load_registry()?;
        let cwd = std::env::current_dir().context("determining working directory")?;

        let scope = pm_engine::scope::resolve_scope(project_override, &cwd, &registry)?;
        let project = registry
            .iter()
            .find(|p| p.project_id == scope.project_id)
            .ok_or(pm_engine::EngineError::ProjectNotFound {
                project_id: scope.project_id.clone(),
            })?;

        let issues_path = issues_path(project);
        let mut store = if issues_path.exists() {
            InMemoryStore::open(&issues_path)?
        } else {
            InMemoryStore::new()
        };
        store.set_projects(registry.clone());
        debug!(
            project_id = %scope.project_id,
            issues = store.len(),
            "opened workspace"
        );

        let service = IssueLifecycleService::new(
            store,
            ServiceConfig {
                explicit_project: project_override.map(ToString::to_string),
                working_dir: cwd,
                default_owner: std::env::var("PM_OWNER").ok().filter(|o| !o.is_empty()),
            },
        );

        Ok(Self {
            service,
            issues_path,
        })
    }

    /// Persist the issues file, creating `.pm/` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.issues_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        self.service.store().save_to(&self.issues_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        crate::logging::init_test_logging();
        assert_eq!(slugify("My Cool Project"), "my-cool-project");
        assert_eq!(slugify("  API v2!  "), "api-v2");
        assert_eq!(slugify("already-slugged"), "already-slugged");
        assert_eq!(slugify("___"), "");
    }

    #[test]
    fn test_issues_path_layout() {
        let project = Project {
            project_id: "p1".to_string(),
            name: "One".to_string(),
            slug: "one".to_string(),
            absolute_path: PathBuf::from("/repos/one"),
        };
        assert_eq!(
            issues_path(&project),
            PathBuf::from("/repos/one/.pm/issues.jsonl")
        );
    }
}
