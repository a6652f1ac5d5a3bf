//! Dependency graph analysis.
//!
//! Computes readiness and blocking relationships from the flat key
//! lists on issues. Linear scans over the project's issue set, O(N)
//! per call; a deliberate simplicity trade-off over an indexed graph
//! at PM-tool scale.
//!
//! Cycles are neither detected nor prevented: a cyclic pair never
//! resolves to ready for either side, which matches the source
//! behavior and is surfaced in docs rather than silently changed.

use crate::model::{BlockedBy, DependencyLink, DependencyReport, DependencyState, Issue, Status};

/// Analyze one issue against its project's full issue set.
///
/// Dependency keys that match no issue are recorded as
/// `unknown`/not-ready entries, never as errors, so analysis always
/// completes. `ready_to_work` is true iff the dependency list is empty
/// or every resolved dependency is `done`.
#[must_use]
pub fn analyze(issue: &Issue, all_project_issues: &[Issue]) -> DependencyReport {
    let depends_on: Vec<DependencyLink> = issue
        .dependencies
        .iter()
        .map(|dep_key| {
            all_project_issues
                .iter()
                .find(|candidate| candidate.key == *dep_key)
                .map_or_else(
                    || DependencyLink {
                        key: dep_key.clone(),
                        title: None,
                        status: DependencyState::Unknown,
                        ready: false,
                    },
                    |dep| DependencyLink {
                        key: dep_key.clone(),
                        title: Some(dep.title.clone()),
                        status: DependencyState::Resolved(dep.status),
                        ready: dep.status == Status::Done,
                    },
                )
        })
        .collect();

    let blocks: Vec<BlockedBy> = all_project_issues
        .iter()
        .filter(|other| other.dependencies.iter().any(|k| *k == issue.key))
        .map(|other| BlockedBy {
            key: other.key.clone(),
            title: other.title.clone(),
            status: other.status,
        })
        .collect();

    let ready_to_work = depends_on.is_empty() || depends_on.iter().all(|d| d.ready);
    let blocking_others = !blocks.is_empty();
    let dependency_count = depends_on.len();
    let blocking_count = blocks.len();

    DependencyReport {
        depends_on,
        blocks,
        ready_to_work,
        blocking_others,
        dependency_count,
        blocking_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_issue(key: &str, status: Status, deps: &[&str]) -> Issue {
        Issue {
            key: key.to_string(),
            project_id: "p1".to_string(),
            title: format!("Issue {key}"),
            status,
            dependencies: deps.iter().map(ToString::to_string).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_dependencies_is_ready() {
        let issue = make_issue("A", Status::Proposed, &[]);
        let report = analyze(&issue, std::slice::from_ref(&issue));
        assert!(report.ready_to_work);
        assert!(!report.blocking_others);
        assert_eq!(report.dependency_count, 0);
    }

    #[test]
    fn test_all_done_dependencies_is_ready() {
        let a = make_issue("A", Status::Proposed, &["B", "C"]);
        let b = make_issue("B", Status::Done, &[]);
        let c = make_issue("C", Status::Done, &[]);
        let all = vec![a.clone(), b, c];

        let report = analyze(&a, &all);
        assert!(report.ready_to_work);
        assert!(report.depends_on.iter().all(|d| d.ready));
    }

    #[test]
    fn test_one_unfinished_dependency_not_ready() {
        let a = make_issue("A", Status::Review, &["B", "C"]);
        let b = make_issue("B", Status::Done, &[]);
        let c = make_issue("C", Status::InProgress, &[]);
        let all = vec![a.clone(), b, c];

        let report = analyze(&a, &all);
        assert!(!report.ready_to_work);
        assert_eq!(report.depends_on[0].key, "B");
        assert!(report.depends_on[0].ready);
        assert_eq!(report.depends_on[1].key, "C");
        assert!(!report.depends_on[1].ready);
        assert_eq!(
            report.depends_on[1].status,
            DependencyState::Resolved(Status::InProgress)
        );
    }

    #[test]
    fn test_dangling_dependency_is_unknown_not_ready() {
        let x = make_issue("X", Status::Proposed, &["Y"]);
        let all = vec![x.clone()];

        let report = analyze(&x, &all);
        assert_eq!(report.depends_on.len(), 1);
        assert_eq!(report.depends_on[0].key, "Y");
        assert_eq!(report.depends_on[0].status, DependencyState::Unknown);
        assert!(report.depends_on[0].title.is_none());
        assert!(!report.depends_on[0].ready);
        assert!(!report.ready_to_work);
    }

    #[test]
    fn test_blocks_collects_reverse_references() {
        let base = make_issue("BASE", Status::InProgress, &[]);
        let d1 = make_issue("D1", Status::Proposed, &["BASE"]);
        let d2 = make_issue("D2", Status::Blocked, &["BASE", "D1"]);
        let unrelated = make_issue("U", Status::Proposed, &["D1"]);
        let all = vec![base.clone(), d1, d2, unrelated];

        let report = analyze(&base, &all);
        assert!(report.blocking_others);
        assert_eq!(report.blocking_count, 2);
        let keys: Vec<&str> = report.blocks.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["D1", "D2"]);
    }

    #[test]
    fn test_cyclic_pair_never_ready() {
        let a = make_issue("A", Status::Proposed, &["B"]);
        let b = make_issue("B", Status::Proposed, &["A"]);
        let all = vec![a.clone(), b.clone()];

        assert!(!analyze(&a, &all).ready_to_work);
        assert!(!analyze(&b, &all).ready_to_work);
    }

    #[test]
    fn test_dependency_order_preserved() {
        let a = make_issue("A", Status::Proposed, &["C", "B"]);
        let b = make_issue("B", Status::Done, &[]);
        let c = make_issue("C", Status::Done, &[]);
        let all = vec![a.clone(), b, c];

        let report = analyze(&a, &all);
        let keys: Vec<&str> = report.depends_on.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["C", "B"]);
    }
}
