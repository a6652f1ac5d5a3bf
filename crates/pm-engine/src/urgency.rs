//! Urgency scoring and work-queue construction.
//!
//! The score is an additive composite, not normalized; it only needs
//! to order a queue consistently, not mean anything in isolation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::EngineError;
use crate::graph;
use crate::model::{DependencyReport, Issue, Priority, QueueItem, RecommendedAction, Status};

/// Age contribution is capped so ancient backlog cannot outrank P1s.
const AGE_CAP: f64 = 20.0;

/// Boost for issues that other issues depend on.
const BLOCKING_BOOST: f64 = 15.0;

/// Composite urgency score for work prioritization.
///
/// `priority + age + blocking + status`, where priority maps
/// P1..P5 to 100/80/60/40/20 (60 for anything out of range), age is
/// `min(age_days * 2, 20)`, blocking adds 15 when the issue is known
/// to block others, and status adds proposed:5, in_progress:10,
/// review:8, blocked:0.
#[must_use]
pub fn urgency_score(issue: &Issue, blocking_others: bool, now: DateTime<Utc>) -> f64 {
    let priority_score = match issue.priority {
        Priority::P1 => 100.0,
        Priority::P2 => 80.0,
        Priority::P4 => 40.0,
        Priority::P5 => 20.0,
        _ => 60.0,
    };

    let age_score = ((issue.age_days(now) * 2) as f64).min(AGE_CAP);

    let blocking_score = if blocking_others { BLOCKING_BOOST } else { 0.0 };

    let status_score = match issue.status {
        Status::InProgress => 10.0,
        Status::Review => 8.0,
        Status::Blocked => 0.0,
        Status::Proposed | Status::Done | Status::Canceled => 5.0,
    };

    priority_score + age_score + blocking_score + status_score
}

/// Queue ordering dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueSort {
    /// P1 first; ties broken by most-recently-updated first.
    Priority,
    /// Descending urgency score.
    #[default]
    Urgency,
    /// Descending `blocks * 10 - dependencies`.
    Dependency,
    /// Oldest created first.
    Age,
}

impl QueueSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Urgency => "urgency",
            Self::Dependency => "dependency",
            Self::Age => "age",
        }
    }
}

impl FromStr for QueueSort {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "priority" => Ok(Self::Priority),
            "urgency" => Ok(Self::Urgency),
            "dependency" => Ok(Self::Dependency),
            "age" => Ok(Self::Age),
            other => Err(EngineError::InvalidSort {
                sort: other.to_string(),
            }),
        }
    }
}

/// Candidate carrying its analysis so sorting never re-scans.
struct Candidate<'a> {
    issue: &'a Issue,
    report: DependencyReport,
    unblockable: bool,
}

/// Build a prioritized work queue from a candidate pool.
///
/// The pool keeps issues in actionable statuses (`proposed`,
/// `in_progress`, `review`) plus any `blocked` issue whose
/// dependencies are all done — those are flagged `unblockable` and
/// recommended for reopening. Everything else is dropped.
///
/// `all_project_issues` supplies the graph context for blocking
/// analysis; `candidates` is the (possibly owner-filtered) pool.
#[must_use]
pub fn build_queue(
    candidates: &[Issue],
    all_project_issues: &[Issue],
    sort: QueueSort,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<QueueItem> {
    let mut pool: Vec<Candidate<'_>> = candidates
        .iter()
        .filter_map(|issue| {
            let report = graph::analyze(issue, all_project_issues);
            if issue.status.is_actionable() {
                Some(Candidate {
                    issue,
                    report,
                    unblockable: false,
                })
            } else if issue.status == Status::Blocked && report.ready_to_work {
                Some(Candidate {
                    issue,
                    report,
                    unblockable: true,
                })
            } else {
                None
            }
        })
        .collect();

    debug!(
        pool = pool.len(),
        sort = sort.as_str(),
        "built actionable queue pool"
    );

    match sort {
        QueueSort::Priority => {
            pool.sort_by(|a, b| {
                a.issue
                    .priority
                    .cmp(&b.issue.priority)
                    .then(b.issue.updated_at.cmp(&a.issue.updated_at))
            });
        }
        QueueSort::Urgency => {
            pool.sort_by(|a, b| {
                let score_a = urgency_score(a.issue, a.report.blocking_others, now);
                let score_b = urgency_score(b.issue, b.report.blocking_others, now);
                score_b
                    .partial_cmp(&score_a)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        QueueSort::Dependency => {
            pool.sort_by_key(|c| {
                let score = (c.report.blocking_count as i64) * 10
                    - (c.report.dependency_count as i64);
                std::cmp::Reverse(score)
            });
        }
        QueueSort::Age => {
            pool.sort_by_key(|c| c.issue.created_at);
        }
    }

    pool.truncate(limit);

    pool.into_iter()
        .map(|c| QueueItem {
            key: c.issue.key.clone(),
            title: c.issue.title.clone(),
            issue_type: c.issue.issue_type,
            status: c.issue.status,
            priority: c.issue.priority,
            age_days: c.issue.age_days(now),
            urgency_score: urgency_score(c.issue, c.report.blocking_others, now),
            unblockable: c.unblockable,
            recommended_action: recommended_action(c.issue.status, c.unblockable),
        })
        .collect()
}

/// Next step for an issue, derived purely from its status.
#[must_use]
pub const fn recommended_action(status: Status, unblockable: bool) -> RecommendedAction {
    match status {
        Status::InProgress => RecommendedAction::LogWork,
        Status::Review => RecommendedAction::RequestMerge,
        Status::Blocked if unblockable => RecommendedAction::Unblock,
        _ => RecommendedAction::StartWork,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_issue(key: &str, status: Status, priority: Priority) -> Issue {
        Issue {
            key: key.to_string(),
            project_id: "p1".to_string(),
            title: format!("Issue {key}"),
            status,
            priority,
            ..Default::default()
        }
    }

    #[test]
    fn test_priority_dominates_by_at_least_eighty() {
        let now = Utc::now();
        let p1 = make_issue("A", Status::Proposed, Priority::P1);
        let p5 = make_issue("B", Status::Proposed, Priority::P5);
        let diff = urgency_score(&p1, false, now) - urgency_score(&p5, false, now);
        assert!(diff >= 80.0, "P1 should outrank P5 by >= 80, got {diff}");
    }

    #[test]
    fn test_age_score_capped_at_twenty() {
        let now = Utc::now();
        let mut old = make_issue("OLD", Status::Proposed, Priority::P3);
        old.created_at = now - Duration::days(400);
        let mut fresh = make_issue("NEW", Status::Proposed, Priority::P3);
        fresh.created_at = now;

        let diff = urgency_score(&old, false, now) - urgency_score(&fresh, false, now);
        assert!((diff - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_blocking_boost() {
        let now = Utc::now();
        let issue = make_issue("A", Status::InProgress, Priority::P3);
        let base = urgency_score(&issue, false, now);
        let boosted = urgency_score(&issue, true, now);
        assert!((boosted - base - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_component() {
        let now = Utc::now();
        let in_progress = make_issue("A", Status::InProgress, Priority::P3);
        let blocked = make_issue("B", Status::Blocked, Priority::P3);
        let diff = urgency_score(&in_progress, false, now) - urgency_score(&blocked, false, now);
        assert!((diff - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_queue_excludes_done_and_stuck_blocked() {
        let now = Utc::now();
        let a = make_issue("A", Status::Proposed, Priority::P3);
        let done = make_issue("DONE", Status::Done, Priority::P1);
        let mut stuck = make_issue("STUCK", Status::Blocked, Priority::P1);
        stuck.dependencies = vec!["A".to_string()]; // A not done

        let all = vec![a.clone(), done.clone(), stuck.clone()];
        let queue = build_queue(&all, &all, QueueSort::Urgency, 10, now);
        let keys: Vec<&str> = queue.iter().map(|q| q.key.as_str()).collect();
        assert_eq!(keys, vec!["A"]);
    }

    #[test]
    fn test_queue_includes_unblockable_blocked() {
        let now = Utc::now();
        let dep = make_issue("DEP", Status::Done, Priority::P3);
        let mut blocked = make_issue("BLK", Status::Blocked, Priority::P2);
        blocked.dependencies = vec!["DEP".to_string()];

        let all = vec![dep.clone(), blocked.clone()];
        let queue = build_queue(&all, &all, QueueSort::Urgency, 10, now);

        let item = queue.iter().find(|q| q.key == "BLK").expect("BLK queued");
        assert!(item.unblockable);
        assert_eq!(item.recommended_action, RecommendedAction::Unblock);
    }

    #[test]
    fn test_priority_sort_ties_broken_by_recent_update() {
        let now = Utc::now();
        let mut stale = make_issue("STALE", Status::Proposed, Priority::P2);
        stale.updated_at = now - Duration::days(5);
        let mut fresh = make_issue("FRESH", Status::Proposed, Priority::P2);
        fresh.updated_at = now;
        let top = make_issue("TOP", Status::Proposed, Priority::P1);

        let all = vec![stale, fresh, top];
        let queue = build_queue(&all, &all, QueueSort::Priority, 10, now);
        let keys: Vec<&str> = queue.iter().map(|q| q.key.as_str()).collect();
        assert_eq!(keys, vec!["TOP", "FRESH", "STALE"]);
    }

    #[test]
    fn test_dependency_sort_prefers_blockers() {
        let now = Utc::now();
        let hub = make_issue("HUB", Status::InProgress, Priority::P3);
        let mut leaf1 = make_issue("L1", Status::Proposed, Priority::P3);
        leaf1.dependencies = vec!["HUB".to_string()];
        let mut leaf2 = make_issue("L2", Status::Proposed, Priority::P3);
        leaf2.dependencies = vec!["HUB".to_string(), "L1".to_string()];

        let all = vec![hub.clone(), leaf1, leaf2];
        let queue = build_queue(&all, &all, QueueSort::Dependency, 10, now);
        assert_eq!(queue[0].key, "HUB");
    }

    #[test]
    fn test_age_sort_oldest_first() {
        let now = Utc::now();
        let mut old = make_issue("OLD", Status::Proposed, Priority::P5);
        old.created_at = now - Duration::days(30);
        let mut newer = make_issue("NEWER", Status::Proposed, Priority::P1);
        newer.created_at = now - Duration::days(1);

        let all = vec![newer, old];
        let queue = build_queue(&all, &all, QueueSort::Age, 10, now);
        let keys: Vec<&str> = queue.iter().map(|q| q.key.as_str()).collect();
        assert_eq!(keys, vec!["OLD", "NEWER"]);
    }

    #[test]
    fn test_queue_limit() {
        let now = Utc::now();
        let issues: Vec<Issue> = (0..10)
            .map(|i| make_issue(&format!("K{i}"), Status::Proposed, Priority::P3))
            .collect();
        let queue = build_queue(&issues, &issues, QueueSort::Age, 3, now);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!("urgency".parse::<QueueSort>().unwrap(), QueueSort::Urgency);
        assert_eq!("PRIORITY".parse::<QueueSort>().unwrap(), QueueSort::Priority);
        assert!("velocity".parse::<QueueSort>().is_err());
    }
}
