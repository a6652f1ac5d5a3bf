//! Core data types for `pm-engine`.
//!
//! Issues serialize to the same JSONL shape the `pml` CLI reads and
//! writes, so stored files stay hand-inspectable.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Issue lifecycle status.
///
/// Six states, fixed set. The transition graph lives in
/// [`crate::transition`]; nothing here is terminal by design — `done`
/// can be reopened and `canceled` can be revived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Proposed,
    InProgress,
    Blocked,
    Review,
    Done,
    Canceled,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Review => "review",
            Self::Done => "done",
            Self::Canceled => "canceled",
        }
    }

    /// True for statuses that belong in a work queue as-is.
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        matches!(self, Self::Proposed | Self::InProgress | Self::Review)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = crate::error::EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "proposed" => Ok(Self::Proposed),
            "in_progress" | "inprogress" => Ok(Self::InProgress),
            "blocked" => Ok(Self::Blocked),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            other => Err(crate::error::EngineError::UnknownStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// Issue priority (P1=urgent .. P5=backlog).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Priority(pub i32);

impl Priority {
    pub const P1: Self = Self(1);
    pub const P2: Self = Self(2);
    pub const P3: Self = Self(3);
    pub const P4: Self = Self(4);
    pub const P5: Self = Self(5);
}

impl Default for Priority {
    fn default() -> Self {
        Self::P3
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl FromStr for Priority {
    type Err = crate::error::EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_uppercase();
        let val = trimmed.strip_prefix('P').unwrap_or(&trimmed);

        match val.parse::<i32>() {
            Ok(p) if (1..=5).contains(&p) => Ok(Self(p)),
            _ => Err(crate::error::EngineError::InvalidPriority {
                priority: s.to_string(),
            }),
        }
    }
}

/// Issue type category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    #[default]
    Feature,
    Bug,
    Refactor,
    Chore,
    Spike,
}

impl IssueType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Bug => "bug",
            Self::Refactor => "refactor",
            Self::Chore => "chore",
            Self::Spike => "spike",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = crate::error::EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feature" => Ok(Self::Feature),
            "bug" => Ok(Self::Bug),
            "refactor" => Ok(Self::Refactor),
            "chore" => Ok(Self::Chore),
            "spike" => Ok(Self::Spike),
            other => Err(crate::error::EngineError::InvalidType {
                issue_type: other.to_string(),
            }),
        }
    }
}

/// Specification concern: what the issue should accomplish.
///
/// Versioned typed struct; replaces an opaque JSON text column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Specification {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acceptance_criteria: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,
}

impl Default for Specification {
    fn default() -> Self {
        Self {
            version: 1,
            objective: None,
            acceptance_criteria: Vec::new(),
            constraints: Vec::new(),
        }
    }
}

impl Specification {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objective.is_none()
            && self.acceptance_criteria.is_empty()
            && self.constraints.is_empty()
    }
}

/// Planning concern: estimates, notes, and blocker bookkeeping.
///
/// `blocker_reason`/`blocked_at` are written by the lifecycle service
/// when an issue transitions into `blocked` and cleared when it leaves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Planning {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocker_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_at: Option<DateTime<Utc>>,
}

impl Default for Planning {
    fn default() -> Self {
        Self {
            version: 1,
            estimate: None,
            notes: None,
            blocker_reason: None,
            blocked_at: None,
        }
    }
}

impl Planning {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.estimate.is_none()
            && self.notes.is_none()
            && self.blocker_reason.is_none()
            && self.blocked_at.is_none()
    }
}

/// Implementation concern: branch, commits, PR linkage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Implementation {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commits: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_url: Option<String>,
}

impl Default for Implementation {
    fn default() -> Self {
        Self {
            version: 1,
            branch: None,
            commits: Vec::new(),
            pr_url: None,
        }
    }
}

impl Implementation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branch.is_none() && self.commits.is_empty() && self.pr_url.is_none()
    }
}

/// The primary issue entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    /// Unique key (e.g., "MYCO-202503-008"). Immutable once assigned.
    pub key: String,

    /// Owning project.
    pub project_id: String,

    /// Title (1-500 chars).
    pub title: String,

    /// Detailed description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Issue type (feature, bug, etc.).
    #[serde(default)]
    pub issue_type: IssueType,

    /// Workflow status.
    #[serde(default)]
    pub status: Status,

    /// Priority (P1=urgent .. P5=backlog).
    #[serde(default)]
    pub priority: Priority,

    /// Assigned owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Module or component this issue belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Keys of issues this one depends on. Ordered, not enforced
    /// foreign keys: entries may reference keys that no longer exist
    /// and are then treated as unknown/not-ready, not as errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    /// Specification concern.
    #[serde(default, skip_serializing_if = "Specification::is_empty")]
    pub specification: Specification,

    /// Planning concern.
    #[serde(default, skip_serializing_if = "Planning::is_empty")]
    pub planning: Planning,

    /// Implementation concern.
    #[serde(default, skip_serializing_if = "Implementation::is_empty")]
    pub implementation: Implementation,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Default for Issue {
    fn default() -> Self {
        Self {
            key: String::new(),
            project_id: String::new(),
            title: String::new(),
            description: None,
            issue_type: IssueType::default(),
            status: Status::default(),
            priority: Priority::default(),
            owner: None,
            module: None,
            dependencies: Vec::new(),
            specification: Specification::default(),
            planning: Planning::default(),
            implementation: Implementation::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

impl Issue {
    /// Whole days elapsed since creation, never negative.
    #[must_use]
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days().max(0)
    }
}

/// A registered project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// Unique project ID.
    pub project_id: String,

    /// Human-readable name.
    pub name: String,

    /// Slug used as the issue-key prefix seed.
    pub slug: String,

    /// Filesystem root used for scope matching.
    pub absolute_path: PathBuf,
}

/// Resolution status of a single dependency reference.
///
/// Dangling keys resolve to `Unknown` rather than failing; analysis
/// proceeds and the dependent simply never becomes ready through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyState {
    Resolved(Status),
    Unknown,
}

impl DependencyState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resolved(status) => status.as_str(),
            Self::Unknown => "unknown",
        }
    }
}

impl Serialize for DependencyState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for DependencyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One resolved entry from an issue's `dependencies` list.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DependencyLink {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub status: DependencyState,
    /// True only when the dependency resolved to a `done` issue.
    pub ready: bool,
}

/// An issue whose `dependencies` list references the analyzed issue.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BlockedBy {
    pub key: String,
    pub title: String,
    pub status: Status,
}

/// Derived dependency analysis for a single issue. Not persisted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DependencyReport {
    pub depends_on: Vec<DependencyLink>,
    pub blocks: Vec<BlockedBy>,
    pub ready_to_work: bool,
    pub blocking_others: bool,
    pub dependency_count: usize,
    pub blocking_count: usize,
}

/// Action a caller should take next, derived purely from status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendedAction {
    /// Proposed: pick it up.
    StartWork,
    /// In progress: log work or commit.
    LogWork,
    /// In review: push the branch, request a merge.
    RequestMerge,
    /// Blocked but all dependencies done: move back to in_progress.
    Unblock,
}

impl RecommendedAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartWork => "start-work",
            Self::LogWork => "log-work",
            Self::RequestMerge => "request-merge",
            Self::Unblock => "unblock",
        }
    }
}

impl Serialize for RecommendedAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in a prioritized work queue. Derived, not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct QueueItem {
    pub key: String,
    pub title: String,
    pub issue_type: IssueType,
    pub status: Status,
    pub priority: Priority,
    pub age_days: i64,
    pub urgency_score: f64,
    /// Blocked status but every dependency is done.
    pub unblockable: bool,
    pub recommended_action: RecommendedAction,
}

/// How the current call's project scope was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeSource {
    /// Caller supplied an explicit project override.
    Override,
    /// Working directory matched a registered project root.
    WorkingDirectory,
    /// Exactly one project is registered; used as the default.
    SoleProject,
}

/// Resolved scope for a single call. Transient, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeContext {
    pub project_id: String,
    pub source: ScopeSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for s in [
            Status::Proposed,
            Status::InProgress,
            Status::Blocked,
            Status::Review,
            Status::Done,
            Status::Canceled,
        ] {
            assert_eq!(s.as_str().parse::<Status>().unwrap(), s);
        }
    }

    #[test]
    fn test_status_unknown_rejected() {
        let err = "shipped".parse::<Status>().unwrap_err();
        assert!(matches!(
            err,
            crate::error::EngineError::UnknownStatus { .. }
        ));
    }

    #[test]
    fn test_priority_parse_variants() {
        assert_eq!("P1".parse::<Priority>().unwrap(), Priority::P1);
        assert_eq!("p4".parse::<Priority>().unwrap(), Priority::P4);
        assert_eq!("3".parse::<Priority>().unwrap(), Priority::P3);
        assert!("P0".parse::<Priority>().is_err());
        assert!("P6".parse::<Priority>().is_err());
        assert!("high".parse::<Priority>().is_err());
    }

    #[test]
    fn test_issue_age_days() {
        let issue = Issue {
            created_at: Utc::now() - chrono::Duration::days(3),
            ..Default::default()
        };
        assert_eq!(issue.age_days(Utc::now()), 3);

        // Clock skew must not go negative
        let future = Issue {
            created_at: Utc::now() + chrono::Duration::days(1),
            ..Default::default()
        };
        assert_eq!(future.age_days(Utc::now()), 0);
    }

    #[test]
    fn test_dependency_state_serializes_as_string() {
        let json = serde_json::to_string(&DependencyState::Resolved(Status::Done)).unwrap();
        assert_eq!(json, "\"done\"");
        let json = serde_json::to_string(&DependencyState::Unknown).unwrap();
        assert_eq!(json, "\"unknown\"");
    }

    #[test]
    fn test_issue_jsonl_shape_skips_empty_concerns() {
        let issue = Issue {
            key: "PROJ-202501-001".to_string(),
            project_id: "p1".to_string(),
            title: "Test".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&issue).unwrap();
        assert!(!json.contains("specification"));
        assert!(!json.contains("planning"));
        assert!(!json.contains("implementation"));
        assert!(!json.contains("dependencies"));
    }

    #[test]
    fn test_planning_roundtrip_with_blocker() {
        let planning = Planning {
            blocker_reason: Some("waiting on API keys".to_string()),
            blocked_at: Some(Utc::now()),
            ..Default::default()
        };
        let json = serde_json::to_string(&planning).unwrap();
        let back: Planning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, planning);
    }
}
