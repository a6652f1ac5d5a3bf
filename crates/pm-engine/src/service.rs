//! Issue lifecycle service: the facade the CLI talks to.
//!
//! Every operation resolves project scope first and refuses to touch
//! issues outside it. A scope mismatch is always an error, never a
//! silent correction.

use std::path::PathBuf;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::graph;
use crate::keygen;
use crate::model::{
    DependencyReport, Issue, IssueType, Priority, Project, QueueItem, ScopeContext, Status,
};
use crate::scope;
use crate::store::IssueStore;
use crate::transition;
use crate::urgency::{self, QueueSort};
use crate::validation::IssueValidator;

/// Caller-side context the service resolves scope from.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Explicit project override (e.g., from `PM_PROJECT_ID` or a
    /// `--project` flag). Trusted without a filesystem check.
    pub explicit_project: Option<String>,

    /// Working directory used for path-based scope resolution.
    pub working_dir: PathBuf,

    /// Owner assigned to new issues when the draft names none.
    pub default_owner: Option<String>,
}

/// Input for creating a new issue. The key, timestamps, and status
/// are assigned by the service, never by the caller.
#[derive(Debug, Clone, Default)]
pub struct IssueDraft {
    /// Project the caller intends to file under. `None` defers to
    /// scope resolution; a mismatch with the resolved scope is an
    /// error.
    pub project_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub issue_type: IssueType,
    pub priority: Priority,
    pub owner: Option<String>,
    pub module: Option<String>,
    pub dependencies: Vec<String>,
}

/// Result of a status transition, with the post-transition
/// dependency picture so callers can render next steps.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub issue: Issue,
    pub old_status: Status,
    pub new_status: Status,
    pub report: DependencyReport,
}

/// Work-queue request parameters.
#[derive(Debug, Clone)]
pub struct QueueOptions {
    pub sort: QueueSort,
    pub limit: usize,
    /// Restrict candidates to this owner.
    pub owner: Option<String>,
}

impl Default for QueueOptions {
    fn default() -> Self {
        Self {
            sort: QueueSort::default(),
            limit: 10,
            owner: None,
        }
    }
}

/// A built work queue plus the context it was computed in.
#[derive(Debug, Clone)]
pub struct WorkQueue {
    pub project_id: String,
    pub items: Vec<QueueItem>,
    /// Size of the candidate pool before sorting and truncation.
    pub candidate_count: usize,
}

/// Orchestrates the pure engine modules over an [`IssueStore`].
pub struct IssueLifecycleService<S: IssueStore> {
    store: S,
    config: ServiceConfig,
}

impl<S: IssueStore> IssueLifecycleService<S> {
    pub fn new(store: S, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Access the underlying store (e.g., to persist after mutations).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the project scope for the current call context.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedScope` when no rule produces a project.
    pub fn resolve_scope(&self) -> Result<ScopeContext> {
        let projects = self.store.list_projects()?;
        scope::resolve_scope(
            self.config.explicit_project.as_deref(),
            &self.config.working_dir,
            &projects,
        )
    }

    /// The scoped project's registration record.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the scoped ID is not registered.
    pub fn scoped_project(&self) -> Result<Project> {
        let scope = self.resolve_scope()?;
        self.store
            .get_project(&scope.project_id)?
            .ok_or(EngineError::ProjectNotFound {
                project_id: scope.project_id,
            })
    }

    /// Create a new issue in the scoped project.
    ///
    /// The key is generated from the project slug and the current
    /// month; the store's insert enforces uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` for an invalid draft, `ScopeMismatch`
    /// if the draft names a different project than the resolved scope,
    /// or `KeyCollision` if a concurrent writer took the same key.
    pub fn create_issue(&mut self, draft: IssueDraft) -> Result<Issue> {
        let scope = self.resolve_scope()?;
        scope::assert_requested_scope(&scope, draft.project_id.as_deref())?;
        let project = self.scoped_project()?;
        let now = Utc::now();

        let existing: Vec<String> = self
            .store
            .list_issues(&project.project_id)?
            .into_iter()
            .map(|i| i.key)
            .collect();
        let key = keygen::generate_key(&project.slug, &existing, now);

        let issue = Issue {
            key,
            project_id: project.project_id.clone(),
            title: draft.title,
            description: draft.description,
            issue_type: draft.issue_type,
            status: Status::Proposed,
            priority: draft.priority,
            owner: draft.owner.or_else(|| self.config.default_owner.clone()),
            module: draft.module,
            dependencies: draft.dependencies,
            created_at: now,
            updated_at: now,
            ..Default::default()
        };

        IssueValidator::validate(&issue).map_err(EngineError::from_validation_errors)?;

        let created = self.store.create_issue(issue)?;
        info!(
            key = %created.key,
            project_id = %created.project_id,
            priority = %created.priority,
            "created issue"
        );
        Ok(created)
    }

    /// Fetch an issue by key, verifying it belongs to the scope.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` for unknown keys and `ScopeMismatch`
    /// for issues owned by another project.
    pub fn get_issue(&self, key: &str) -> Result<Issue> {
        let scope = self.resolve_scope()?;
        let issue = self
            .store
            .get_issue(key)?
            .ok_or_else(|| EngineError::IssueNotFound {
                key: key.to_string(),
            })?;
        scope::assert_in_scope(&scope, &issue.project_id)?;
        Ok(issue)
    }

    /// All issues in the scoped project, sorted by key.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedScope` when no project can be determined.
    pub fn list_issues(&self) -> Result<Vec<Issue>> {
        let scope = self.resolve_scope()?;
        self.store.list_issues(&scope.project_id)
    }

    /// Apply a status transition with full validation and blocker
    /// bookkeeping.
    ///
    /// Entering `blocked` records the reason and timestamp in the
    /// planning concern; leaving `blocked` clears both.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition`, `MissingBlockerReason`,
    /// `IssueNotFound`, or `ScopeMismatch`.
    pub fn update_status(
        &mut self,
        key: &str,
        requested: Status,
        blocker_reason: Option<&str>,
    ) -> Result<TransitionOutcome> {
        let mut issue = self.get_issue(key)?;
        let old_status = issue.status;

        let new_status = transition::validate_transition(old_status, requested, blocker_reason)?;

        let now = Utc::now();
        if new_status == Status::Blocked {
            issue.planning.blocker_reason = blocker_reason.map(|r| r.trim().to_string());
            issue.planning.blocked_at = Some(now);
        } else if old_status == Status::Blocked {
            issue.planning.blocker_reason = None;
            issue.planning.blocked_at = None;
        }
        issue.status = new_status;
        issue.updated_at = now;

        let saved = self.store.save_issue(issue)?;
        info!(
            key = %saved.key,
            from = %old_status,
            to = %new_status,
            "status transition"
        );

        let all = self.store.list_issues(&saved.project_id)?;
        let report = graph::analyze(&saved, &all);

        Ok(TransitionOutcome {
            issue: saved,
            old_status,
            new_status,
            report,
        })
    }

    /// Dependency analysis for one issue against its project.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` or `ScopeMismatch`.
    pub fn dependency_report(&self, key: &str) -> Result<DependencyReport> {
        let issue = self.get_issue(key)?;
        let all = self.store.list_issues(&issue.project_id)?;
        Ok(graph::analyze(&issue, &all))
    }

    /// Build a prioritized work queue for the scoped project.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedScope` when no project can be determined.
    pub fn work_queue(&self, options: &QueueOptions) -> Result<WorkQueue> {
        let scope = self.resolve_scope()?;
        let all = self.store.list_issues(&scope.project_id)?;

        let candidates: Vec<Issue> = match &options.owner {
            Some(owner) => all
                .iter()
                .filter(|i| i.owner.as_deref() == Some(owner.as_str()))
                .cloned()
                .collect(),
            None => all.clone(),
        };
        debug!(
            project_id = %scope.project_id,
            candidates = candidates.len(),
            "building work queue"
        );

        let items = urgency::build_queue(&candidates, &all, options.sort, options.limit, Utc::now());

        Ok(WorkQueue {
            project_id: scope.project_id,
            items,
            candidate_count: candidates.len(),
        })
    }

    /// Issues ready to pick up: actionable status and every
    /// dependency done.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedScope` when no project can be determined.
    pub fn ready_issues(&self) -> Result<Vec<(Issue, DependencyReport)>> {
        let all = self.list_issues()?;
        Ok(all
            .iter()
            .filter(|i| i.status.is_actionable())
            .map(|i| (i.clone(), graph::analyze(i, &all)))
            .filter(|(_, report)| report.ready_to_work)
            .collect())
    }

    /// Blocked issues with their dependency picture, unblockable
    /// ones first.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedScope` when no project can be determined.
    pub fn blocked_issues(&self) -> Result<Vec<(Issue, DependencyReport)>> {
        let all = self.list_issues()?;
        let mut blocked: Vec<(Issue, DependencyReport)> = all
            .iter()
            .filter(|i| i.status == Status::Blocked)
            .map(|i| (i.clone(), graph::analyze(i, &all)))
            .collect();
        blocked.sort_by_key(|(_, report)| !report.ready_to_work);
        Ok(blocked)
    }
}
