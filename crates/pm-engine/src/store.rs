//! Persistence collaborator for the lifecycle engine.
//!
//! The engine itself never owns persisted state; it computes over
//! snapshots supplied through [`IssueStore`]. `InMemoryStore` is the
//! bundled implementation: HashMaps in memory, JSONL files on disk.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};
use crate::jsonl;
use crate::model::{Issue, Project};

/// Storage interface consumed by the lifecycle service.
///
/// Uniqueness of issue keys is enforced here, at insert — the key
/// generator is pure and race-unaware by contract, so a concurrent
/// caller computing the same next number surfaces as `KeyCollision`
/// from exactly one of the two inserts.
pub trait IssueStore {
    /// Fetch a single issue by key, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage lookup fails.
    fn get_issue(&self, key: &str) -> Result<Option<Issue>>;

    /// All issues belonging to a project, sorted by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage lookup fails.
    fn list_issues(&self, project_id: &str) -> Result<Vec<Issue>>;

    /// Insert a new issue; the key must not already exist.
    ///
    /// # Errors
    ///
    /// Returns `KeyCollision` if the key is taken.
    fn create_issue(&mut self, issue: Issue) -> Result<Issue>;

    /// Persist changes to an existing issue.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the key is unknown.
    fn save_issue(&mut self, issue: Issue) -> Result<Issue>;

    /// Fetch a registered project by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage lookup fails.
    fn get_project(&self, project_id: &str) -> Result<Option<Project>>;

    /// All registered projects, in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage lookup fails.
    fn list_projects(&self) -> Result<Vec<Project>>;
}

/// In-memory store backed by JSONL files.
///
/// Use [`InMemoryStore::open`] to load an issues file and
/// [`InMemoryStore::save`] to persist back. Projects are registered
/// in memory (the CLI layer persists its registry separately).
pub struct InMemoryStore {
    issues: HashMap<String, Issue>,
    projects: Vec<Project>,
    dirty_keys: HashSet<String>,
    issues_path: Option<PathBuf>,
}

impl InMemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            issues: HashMap::new(),
            projects: Vec::new(),
            dirty_keys: HashSet::new(),
            issues_path: None,
        }
    }

    /// Open and load issues from a JSONL file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let loaded = jsonl::load(path)?;

        let mut store = Self::new();
        store.issues_path = Some(path.to_path_buf());
        for issue in loaded {
            store.issues.insert(issue.key.clone(), issue);
        }

        Ok(store)
    }

    /// Save to the file that was opened.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if no file path is set, or `Io` on write
    /// failure.
    pub fn save(&self) -> Result<()> {
        let path = self
            .issues_path
            .as_ref()
            .ok_or_else(|| EngineError::Storage("No file path set; use save_to()".to_string()))?;
        self.save_to(path.clone())
    }

    /// Save to a specific file path.
    ///
    /// # Errors
    ///
    /// Returns `Io` on write failure.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut issues: Vec<Issue> = self.issues.values().cloned().collect();
        issues.sort_by(|a, b| a.key.cmp(&b.key));
        jsonl::save(path.as_ref(), &issues)
    }

    /// Register a project. Replaces any existing registration with
    /// the same ID, keeping its original position.
    pub fn register_project(&mut self, project: Project) {
        if let Some(existing) = self
            .projects
            .iter_mut()
            .find(|p| p.project_id == project.project_id)
        {
            *existing = project;
        } else {
            self.projects.push(project);
        }
    }

    /// Replace the full project registry (e.g., loaded from disk).
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
    }

    /// All issue keys for a project; input for the key generator.
    #[must_use]
    pub fn project_keys(&self, project_id: &str) -> Vec<String> {
        self.issues
            .values()
            .filter(|i| i.project_id == project_id)
            .map(|i| i.key.clone())
            .collect()
    }

    /// Check if any issues have been modified since load.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty_keys.is_empty()
    }

    /// Clear dirty tracking flags.
    pub fn clear_dirty(&mut self) {
        self.dirty_keys.clear();
    }

    /// Total number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Check if the store has no issues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl IssueStore for InMemoryStore {
    fn get_issue(&self, key: &str) -> Result<Option<Issue>> {
        Ok(self.issues.get(key).cloned())
    }

    fn list_issues(&self, project_id: &str) -> Result<Vec<Issue>> {
        let mut issues: Vec<Issue> = self
            .issues
            .values()
            .filter(|i| i.project_id == project_id)
            .cloned()
            .collect();
        issues.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(issues)
    }

    fn create_issue(&mut self, issue: Issue) -> Result<Issue> {
        if self.issues.contains_key(&issue.key) {
            return Err(EngineError::KeyCollision {
                key: issue.key.clone(),
            });
        }
        self.dirty_keys.insert(issue.key.clone());
        self.issues.insert(issue.key.clone(), issue.clone());
        Ok(issue)
    }

    fn save_issue(&mut self, issue: Issue) -> Result<Issue> {
        if !self.issues.contains_key(&issue.key) {
            return Err(EngineError::IssueNotFound {
                key: issue.key.clone(),
            });
        }
        self.dirty_keys.insert(issue.key.clone());
        self.issues.insert(issue.key.clone(), issue.clone());
        Ok(issue)
    }

    fn get_project(&self, project_id: &str) -> Result<Option<Project>> {
        Ok(self
            .projects
            .iter()
            .find(|p| p.project_id == project_id)
            .cloned())
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.clone())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
