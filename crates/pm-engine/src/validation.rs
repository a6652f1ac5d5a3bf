//! Validation helpers for `pm-engine`.
//!
//! These routines enforce issue data constraints and return
//! structured validation errors without mutating storage.

use crate::error::ValidationError;
use crate::model::Issue;

/// Validates issue fields and invariants.
pub struct IssueValidator;

impl IssueValidator {
    /// Validate an issue and return all validation errors found.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are
    /// violated.
    pub fn validate(issue: &Issue) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // Key: required, PREFIX-YYYYMM-NNN format.
        if issue.key.trim().is_empty() {
            errors.push(ValidationError::new("key", "cannot be empty"));
        } else if !is_valid_key_format(&issue.key) {
            errors.push(ValidationError::new(
                "key",
                "invalid format (expected PREFIX-YYYYMM-NNN)",
            ));
        }

        // Project: required.
        if issue.project_id.trim().is_empty() {
            errors.push(ValidationError::new("project_id", "cannot be empty"));
        }

        // Title: required, max 500 chars.
        if issue.title.trim().is_empty() {
            errors.push(ValidationError::new("title", "cannot be empty"));
        }
        if issue.title.len() > 500 {
            errors.push(ValidationError::new("title", "exceeds 500 characters"));
        }

        // Description: optional, max 100KB.
        if let Some(description) = issue.description.as_ref() {
            if description.len() > 102_400 {
                errors.push(ValidationError::new("description", "exceeds 100KB"));
            }
        }

        // Priority: P1-P5 range.
        if !(1..=5).contains(&issue.priority.0) {
            errors.push(ValidationError::new("priority", "must be P1-P5"));
        }

        // Timestamps: created_at <= updated_at.
        if issue.updated_at < issue.created_at {
            errors.push(ValidationError::new(
                "updated_at",
                "cannot be before created_at",
            ));
        }

        // Dependencies: no self-reference, no duplicates.
        if issue.dependencies.iter().any(|dep| *dep == issue.key) {
            errors.push(ValidationError::new(
                "dependencies",
                "issue cannot depend on itself",
            ));
        }
        for (i, dep) in issue.dependencies.iter().enumerate() {
            if issue.dependencies[..i].contains(dep) {
                errors.push(ValidationError::new(
                    "dependencies",
                    format!("duplicate entry: {dep}"),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Check `PREFIX-YYYYMM-NNN`: 1-4 uppercase alphanumerics, a six-digit
/// period, and a numeric suffix of at least three digits.
#[must_use]
pub fn is_valid_key_format(key: &str) -> bool {
    let mut parts = key.split('-');
    let (Some(prefix), Some(period), Some(suffix), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    let prefix_ok = (1..=4).contains(&prefix.len())
        && prefix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    let period_ok = period.len() == 6 && period.chars().all(|c| c.is_ascii_digit());
    let suffix_ok = suffix.len() >= 3 && suffix.chars().all(|c| c.is_ascii_digit());

    prefix_ok && period_ok && suffix_ok
}
