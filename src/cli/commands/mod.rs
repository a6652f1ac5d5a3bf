//! Command implementations.

pub mod blocked;
pub mod create;
pub mod deps;
pub mod init;
pub mod list;
pub mod projects;
pub mod queue;
pub mod ready;
pub mod show;
pub mod status;

use std::io::{self, IsTerminal};

use pm_engine::EngineError;

use crate::format::output::ErrorView;

/// Stable machine-readable kind for an engine error.
#[must_use]
pub fn error_kind(err: &EngineError) -> &'static str {
    match err {
        EngineError::UnknownStatus { .. } => "unknown_status",
        EngineError::InvalidTransition { .. } => "invalid_transition",
        EngineError::MissingBlockerReason => "missing_blocker_reason",
        EngineError::UnresolvedScope => "unresolved_scope",
        EngineError::ScopeMismatch { .. } => "scope_mismatch",
        EngineError::IssueNotFound { .. } => "issue_not_found",
        EngineError::ProjectNotFound { .. } => "project_not_found",
        EngineError::KeyCollision { .. } => "key_collision",
        EngineError::Validation { .. } | EngineError::ValidationErrors { .. } => "validation",
        EngineError::InvalidPriority { .. } => "invalid_priority",
        EngineError::InvalidType { .. } => "invalid_type",
        EngineError::InvalidSort { .. } => "invalid_sort",
        EngineError::JsonlParse { .. } => "jsonl_parse",
        EngineError::FileNotFound(_) => "file_not_found",
        EngineError::Storage(_) => "storage",
        EngineError::Io(_) => "io",
        EngineError::Json(_) => "json",
    }
}

/// Print an error and exit with a meaningful code.
///
/// JSON mode (or a non-TTY stdout) emits a structured error to
/// stderr; otherwise a plain `Error:` line.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    let (kind, exit_code) = err.downcast_ref::<EngineError>().map_or(("internal", 1), |e| {
        let code = match e {
            EngineError::IssueNotFound { .. } | EngineError::ProjectNotFound { .. } => 2,
            EngineError::InvalidTransition { .. }
            | EngineError::MissingBlockerReason
            | EngineError::Validation { .. }
            | EngineError::ValidationErrors { .. } => 3,
            _ => 1,
        };
        (error_kind(e), code)
    });

    let use_json = json_mode || !io::stdout().is_terminal();
    if use_json {
        let view = ErrorView {
            error: format!("{err:#}"),
            kind: kind.to_string(),
        };
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&view).unwrap_or_else(|_| format!("{{\"error\":\"{err}\"}}"))
        );
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(exit_code);
}
