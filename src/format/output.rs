//! JSON output shapes for `--json` mode.

use serde::Serialize;

use pm_engine::model::{DependencyReport, ScopeContext};
use pm_engine::{Issue, Project, QueueItem, Status};

/// Issue with its dependency picture for show/deps views.
#[derive(Debug, Clone, Serialize)]
pub struct IssueDetails {
    #[serde(flatten)]
    pub issue: Issue,
    pub report: DependencyReport,
}

/// Result of a status transition.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionView {
    pub key: String,
    pub old_status: Status,
    pub new_status: Status,
    pub ready_to_work: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocker_reason: Option<String>,
}

/// Work queue with its scope context.
#[derive(Debug, Clone, Serialize)]
pub struct QueueView {
    pub project_id: String,
    pub sort: String,
    pub candidate_count: usize,
    pub items: Vec<QueueItem>,
}

/// Registered project for the projects view.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub issue_count: Option<usize>,
}

/// Issue list with its scope context.
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub scope: ScopeContext,
    pub total: usize,
    pub issues: Vec<Issue>,
}

/// Structured error for JSON mode, written to stderr.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorView {
    pub error: String,
    pub kind: String,
}
