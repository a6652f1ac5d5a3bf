//! Plain text (non-ANSI) formatting for terminal output.
//!
//! - Status icons (○ ◐ ● ◑ ✓ ✗)
//! - Priority labels (P1-P5)
//! - Type badges ([bug], [feature], etc.)
//! - Issue line formatting

use pm_engine::model::{DependencyReport, DependencyState};
use pm_engine::{Issue, QueueItem, Status};

/// Status icon characters.
pub mod icons {
    /// Proposed - available to pick up (hollow circle).
    pub const PROPOSED: &str = "○";
    /// In progress - active work (half-filled).
    pub const IN_PROGRESS: &str = "◐";
    /// Blocked - needs attention (filled circle).
    pub const BLOCKED: &str = "●";
    /// Review - awaiting merge (other half).
    pub const REVIEW: &str = "◑";
    /// Done - completed (checkmark).
    pub const DONE: &str = "✓";
    /// Canceled (X mark).
    pub const CANCELED: &str = "✗";
}

/// Return the icon character for a status.
#[must_use]
pub const fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Proposed => icons::PROPOSED,
        Status::InProgress => icons::IN_PROGRESS,
        Status::Blocked => icons::BLOCKED,
        Status::Review => icons::REVIEW,
        Status::Done => icons::DONE,
        Status::Canceled => icons::CANCELED,
    }
}

/// Format a single-line issue summary.
///
/// Format: `{icon} {key} [{priority}] [{type}] {title}`
#[must_use]
pub fn issue_line(issue: &Issue) -> String {
    format!(
        "{} {} [{}] [{}] {}",
        status_icon(issue.status),
        issue.key,
        issue.priority,
        issue.issue_type,
        issue.title
    )
}

/// Format a queue entry with rank, score and recommended action.
#[must_use]
pub fn queue_line(rank: usize, item: &QueueItem) -> String {
    let flag = if item.unblockable { " (unblockable)" } else { "" };
    format!(
        "{rank:>2}. {} {} [{}] {:.0} {}{flag} -> {}",
        status_icon(item.status),
        item.key,
        item.priority,
        item.urgency_score,
        item.title,
        item.recommended_action
    )
}

/// Multi-line dependency report rendering.
#[must_use]
pub fn dependency_report(report: &DependencyReport) -> String {
    let mut out = String::new();

    if report.depends_on.is_empty() {
        out.push_str("Depends on: none\n");
    } else {
        out.push_str("Depends on:\n");
        for dep in &report.depends_on {
            let marker = if dep.ready { "✓" } else { "…" };
            let title = dep.title.as_deref().unwrap_or("(unknown issue)");
            let status = match dep.status {
                DependencyState::Resolved(s) => s.as_str(),
                DependencyState::Unknown => "unknown",
            };
            out.push_str(&format!("  {marker} {} [{status}] {title}\n", dep.key));
        }
    }

    if report.blocks.is_empty() {
        out.push_str("Blocks: none\n");
    } else {
        out.push_str("Blocks:\n");
        for b in &report.blocks {
            out.push_str(&format!("  {} [{}] {}\n", b.key, b.status, b.title));
        }
    }

    out.push_str(&format!(
        "Ready to work: {}\n",
        if report.ready_to_work { "yes" } else { "no" }
    ));
    out
}

/// Multi-line full issue rendering for the show view.
#[must_use]
pub fn issue_details(issue: &Issue) -> String {
    let mut out = String::new();
    out.push_str(&issue_line(issue));
    out.push('\n');
    out.push_str(&format!("Status: {}\n", issue.status));
    if let Some(owner) = &issue.owner {
        out.push_str(&format!("Owner: {owner}\n"));
    }
    if let Some(module) = &issue.module {
        out.push_str(&format!("Module: {module}\n"));
    }
    if let Some(desc) = &issue.description {
        out.push_str(&format!("\n{desc}\n"));
    }
    if let Some(reason) = &issue.planning.blocker_reason {
        out.push_str(&format!("\nBlocked: {reason}"));
        if let Some(at) = issue.planning.blocked_at {
            out.push_str(&format!(" (since {})", at.format("%Y-%m-%d")));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "\nCreated: {}  Updated: {}\n",
        issue.created_at.format("%Y-%m-%d %H:%M"),
        issue.updated_at.format("%Y-%m-%d %H:%M")
    ));
    out
}
