//! Status transition validation.
//!
//! A fixed directed graph over the six lifecycle states. Pure decision
//! functions; nothing here touches storage or mutates the issue.
//!
//! ```text
//! proposed    -> in_progress, canceled
//! in_progress -> blocked, review, canceled
//! blocked     -> in_progress, canceled
//! review      -> in_progress, done, canceled
//! done        -> in_progress   (reopen)
//! canceled    -> proposed      (revive)
//! ```

use crate::error::{EngineError, Result};
use crate::model::Status;

/// Legal transition targets for a given current status.
///
/// `done` and `canceled` both have outgoing edges: nothing in the
/// lifecycle is permanently frozen.
#[must_use]
pub const fn allowed_transitions(from: Status) -> &'static [Status] {
    match from {
        Status::Proposed => &[Status::InProgress, Status::Canceled],
        Status::InProgress => &[Status::Blocked, Status::Review, Status::Canceled],
        Status::Blocked => &[Status::InProgress, Status::Canceled],
        Status::Review => &[Status::InProgress, Status::Done, Status::Canceled],
        Status::Done => &[Status::InProgress],
        Status::Canceled => &[Status::Proposed],
    }
}

/// Validate a requested status transition.
///
/// Returns the new status on success. Blocking always requires a
/// non-empty reason, checked before graph legality so the caller hears
/// about the missing reason even for an illegal edge.
///
/// # Errors
///
/// - `MissingBlockerReason` if `requested` is `blocked` and
///   `blocker_reason` is absent or whitespace.
/// - `InvalidTransition` (carrying the allowed set) if the edge is not
///   in the graph.
pub fn validate_transition(
    current: Status,
    requested: Status,
    blocker_reason: Option<&str>,
) -> Result<Status> {
    if requested == Status::Blocked && blocker_reason.is_none_or(|r| r.trim().is_empty()) {
        return Err(EngineError::MissingBlockerReason);
    }

    let allowed = allowed_transitions(current);
    if allowed.contains(&requested) {
        Ok(requested)
    } else {
        Err(EngineError::InvalidTransition {
            from: current,
            to: requested,
            allowed: allowed.to_vec(),
        })
    }
}
