//! Error types for `pm-engine`.
//!
//! Every engine failure is a typed value returned through `Result`;
//! nothing in this crate raises across the API boundary. The calling
//! layer maps these to user-facing messages and hints.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::Status;

/// Primary error type for engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    // === Status / Transition Errors ===
    /// A raw status string is not one of the six defined states.
    #[error("Unknown status: {status}")]
    UnknownStatus { status: String },

    /// The requested transition is not in the status graph.
    ///
    /// `allowed` carries the legal targets so callers can present
    /// valid choices instead of dead-ending.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: Status,
        to: Status,
        allowed: Vec<Status>,
    },

    /// Blocking an issue requires a non-empty blocker reason.
    #[error("Blocker reason required when setting status to 'blocked'")]
    MissingBlockerReason,

    // === Scope Errors ===
    /// No project scope could be resolved for the current call.
    #[error(
        "No project scope: run inside a registered project or pass an explicit project override"
    )]
    UnresolvedScope,

    /// The target does not belong to the resolved project scope.
    ///
    /// Treated as a logic violation, never silently corrected.
    #[error("Project scope mismatch: resolved={resolved}, requested={requested}")]
    ScopeMismatch { resolved: String, requested: String },

    // === Issue / Project Errors ===
    /// Issue with the specified key was not found.
    #[error("Issue not found: {key}")]
    IssueNotFound { key: String },

    /// Project with the specified ID is not registered.
    #[error("Project not found: {project_id}")]
    ProjectNotFound { project_id: String },

    /// Attempted to create an issue with a key that already exists.
    #[error("Issue key collision: {key}")]
    KeyCollision { key: String },

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {errors:?}")]
    ValidationErrors { errors: Vec<ValidationError> },

    /// Priority out of valid range (P1-P5).
    #[error("Priority must be P1-P5, got: {priority}")]
    InvalidPriority { priority: String },

    /// Invalid issue type value.
    #[error("Invalid issue type: {issue_type}")]
    InvalidType { issue_type: String },

    /// Unrecognized queue sort dimension.
    #[error("Invalid queue sort: {sort} (expected priority, urgency, dependency, or age)")]
    InvalidSort { sort: String },

    // === Storage Errors ===
    /// Failed to parse a line in the issues JSONL file.
    #[error("JSONL parse error at line {line}: {reason}")]
    JsonlParse { line: usize, reason: String },

    /// File not found at the specified path.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Generic storage collaborator error.
    #[error("Storage error: {0}")]
    Storage(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single field validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl EngineError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = &errors[0];
            Self::Validation {
                field: err.field.clone(),
                reason: err.message.clone(),
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }
}

/// Result type using `EngineError`.
pub type Result<T> = std::result::Result<T, EngineError>;
