//! Project scope resolution and enforcement.
//!
//! Every issue operation runs against exactly one registered project.
//! The resolver maps an execution context (explicit override or
//! working directory) to that project; the assertion helpers make a
//! cross-project touch fail loudly instead of silently corrupting
//! another project's data.
//!
//! This is a logical guard, not a security boundary against malicious
//! callers.

use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, Result};
use crate::model::{Project, ScopeContext, ScopeSource};

/// Resolve the project scope for one call.
///
/// Resolution order:
/// 1. A non-empty explicit override is trusted as-is (no existence
///    check by contract; callers may validate separately).
/// 2. The working directory matches a registered project root, either
///    exactly or as a path descendant (covers submodule checkouts).
///    First match wins in registration order.
/// 3. With exactly one registered project, that project is the
///    default.
///
/// # Errors
///
/// Returns `UnresolvedScope` when none of the rules produce a project.
pub fn resolve_scope(
    explicit_override: Option<&str>,
    cwd: &Path,
    registered_projects: &[Project],
) -> Result<ScopeContext> {
    if let Some(project_id) = explicit_override.map(str::trim).filter(|s| !s.is_empty()) {
        debug!(project_id, "scope resolved from explicit override");
        return Ok(ScopeContext {
            project_id: project_id.to_string(),
            source: ScopeSource::Override,
        });
    }

    for project in registered_projects {
        if path_is_within(cwd, &project.absolute_path) {
            debug!(
                project_id = %project.project_id,
                cwd = %cwd.display(),
                "scope resolved from working directory"
            );
            return Ok(ScopeContext {
                project_id: project.project_id.clone(),
                source: ScopeSource::WorkingDirectory,
            });
        }
    }

    if let [only] = registered_projects {
        debug!(project_id = %only.project_id, "scope defaulted to sole project");
        return Ok(ScopeContext {
            project_id: only.project_id.clone(),
            source: ScopeSource::SoleProject,
        });
    }

    Err(EngineError::UnresolvedScope)
}

/// Assert that an issue belongs to the resolved scope.
///
/// # Errors
///
/// Returns `ScopeMismatch` when the project IDs differ. Never
/// corrected silently.
pub fn assert_in_scope(scope: &ScopeContext, issue_project_id: &str) -> Result<()> {
    if issue_project_id == scope.project_id {
        Ok(())
    } else {
        Err(EngineError::ScopeMismatch {
            resolved: scope.project_id.clone(),
            requested: issue_project_id.to_string(),
        })
    }
}

/// Assert that a caller-supplied project ID agrees with the resolved
/// scope. `None` means the caller deferred to resolution and passes.
///
/// # Errors
///
/// Returns `ScopeMismatch` when a supplied ID disagrees.
pub fn assert_requested_scope(scope: &ScopeContext, requested: Option<&str>) -> Result<()> {
    match requested.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(()),
        Some(id) if id == scope.project_id => Ok(()),
        Some(id) => Err(EngineError::ScopeMismatch {
            resolved: scope.project_id.clone(),
            requested: id.to_string(),
        }),
    }
}

/// Component-wise containment check: equal paths match, and so does
/// any descendant of the project root. Purely logical — no filesystem
/// access, no symlink canonicalization.
fn path_is_within(child: &Path, parent: &Path) -> bool {
    child == parent || child.starts_with(parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn project(id: &str, path: &str) -> Project {
        Project {
            project_id: id.to_string(),
            name: id.to_string(),
            slug: id.to_string(),
            absolute_path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_override_wins_without_existence_check() {
        let projects = vec![project("p1", "/repo")];
        let ctx = resolve_scope(Some("p9"), Path::new("/repo"), &projects).unwrap();
        assert_eq!(ctx.project_id, "p9");
        assert_eq!(ctx.source, ScopeSource::Override);
    }

    #[test]
    fn test_blank_override_ignored() {
        let projects = vec![project("p1", "/repo")];
        let ctx = resolve_scope(Some("  "), Path::new("/repo"), &projects).unwrap();
        assert_eq!(ctx.project_id, "p1");
        assert_eq!(ctx.source, ScopeSource::WorkingDirectory);
    }

    #[test]
    fn test_exact_cwd_match() {
        let projects = vec![project("p1", "/repo"), project("p2", "/other")];
        let ctx = resolve_scope(None, Path::new("/other"), &projects).unwrap();
        assert_eq!(ctx.project_id, "p2");
        assert_eq!(ctx.source, ScopeSource::WorkingDirectory);
    }

    #[test]
    fn test_descendant_cwd_match() {
        let projects = vec![project("p1", "/repo")];
        let ctx = resolve_scope(None, Path::new("/repo/sub"), &projects).unwrap();
        assert_eq!(ctx.project_id, "p1");
        assert_eq!(ctx.source, ScopeSource::WorkingDirectory);
    }

    #[test]
    fn test_sibling_prefix_does_not_match() {
        // /repo2 is not inside /repo; component matching must hold.
        let projects = vec![project("p1", "/repo"), project("p2", "/elsewhere")];
        let err = resolve_scope(None, Path::new("/repo2"), &projects).unwrap_err();
        assert!(matches!(err, EngineError::UnresolvedScope));
    }

    #[test]
    fn test_first_matching_project_wins() {
        let projects = vec![project("outer", "/repo"), project("inner", "/repo/sub")];
        let ctx = resolve_scope(None, Path::new("/repo/sub/dir"), &projects).unwrap();
        assert_eq!(ctx.project_id, "outer");
    }

    #[test]
    fn test_sole_project_fallback() {
        let projects = vec![project("p1", "/repo")];
        let ctx = resolve_scope(None, Path::new("/nowhere"), &projects).unwrap();
        assert_eq!(ctx.project_id, "p1");
        assert_eq!(ctx.source, ScopeSource::SoleProject);
    }

    #[test]
    fn test_no_fallback_with_multiple_projects() {
        let projects = vec![project("p1", "/repo"), project("p2", "/other")];
        let err = resolve_scope(None, Path::new("/nowhere"), &projects).unwrap_err();
        assert!(matches!(err, EngineError::UnresolvedScope));
    }

    #[test]
    fn test_no_projects_unresolved() {
        let err = resolve_scope(None, Path::new("/anywhere"), &[]).unwrap_err();
        assert!(matches!(err, EngineError::UnresolvedScope));
    }

    #[test]
    fn test_assert_in_scope() {
        let scope = ScopeContext {
            project_id: "p1".to_string(),
            source: ScopeSource::WorkingDirectory,
        };
        assert!(assert_in_scope(&scope, "p1").is_ok());

        let err = assert_in_scope(&scope, "p2").unwrap_err();
        match err {
            EngineError::ScopeMismatch {
                resolved,
                requested,
            } => {
                assert_eq!(resolved, "p1");
                assert_eq!(requested, "p2");
            }
            other => panic!("expected ScopeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_assert_requested_scope() {
        let scope = ScopeContext {
            project_id: "p1".to_string(),
            source: ScopeSource::Override,
        };
        assert!(assert_requested_scope(&scope, None).is_ok());
        assert!(assert_requested_scope(&scope, Some("")).is_ok());
        assert!(assert_requested_scope(&scope, Some("p1")).is_ok());
        assert!(matches!(
            assert_requested_scope(&scope, Some("p2")),
            Err(EngineError::ScopeMismatch { .. })
        ));
    }
}
