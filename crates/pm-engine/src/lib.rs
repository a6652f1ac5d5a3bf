//! `pm-engine` — Issue lifecycle and scoping engine.
//!
//! Pure domain logic for a lightweight project tracker: a status
//! state machine, dependency-graph analysis, urgency scoring, issue
//! key generation, and project scope resolution, orchestrated by
//! [`IssueLifecycleService`]. Data lives in memory and persists as
//! JSONL files.
//!
//! # Quick Start
//!
//! ```no_run
//! use pm_engine::{
//!     InMemoryStore, IssueDraft, IssueLifecycleService, ServiceConfig, Status,
//! };
//!
//! // Load existing file
//! let store = InMemoryStore::open("path/to/.pm/issues.jsonl").unwrap();
//!
//! let mut service = IssueLifecycleService::new(store, ServiceConfig {
//!     explicit_project: None,
//!     working_dir: std::env::current_dir().unwrap(),
//!     default_owner: None,
//! });
//!
//! // Create
//! let issue = service.create_issue(IssueDraft {
//!     title: "New task".into(),
//!     ..Default::default()
//! }).unwrap();
//!
//! // Transition
//! service.update_status(&issue.key, Status::InProgress, None).unwrap();
//!
//! // Save back
//! service.store().save().unwrap();
//! ```

pub mod error;
pub mod graph;
pub mod jsonl;
pub mod keygen;
pub mod model;
pub mod scope;
pub mod service;
pub mod store;
pub mod transition;
pub mod urgency;
pub mod validation;

pub use error::{EngineError, Result};
pub use model::{
    DependencyReport, Issue, IssueType, Priority, Project, QueueItem, ScopeContext, ScopeSource,
    Status,
};
pub use service::{
    IssueDraft, IssueLifecycleService, QueueOptions, ServiceConfig, TransitionOutcome, WorkQueue,
};
pub use store::{InMemoryStore, IssueStore};
pub use urgency::QueueSort;
