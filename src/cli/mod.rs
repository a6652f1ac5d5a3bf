//! Command-line interface for `pm_lite`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use clap::{Args, Parser, Subcommand};

/// `pm_lite` (pml) - Lightweight issue lifecycle tracker.
#[derive(Parser, Debug)]
#[command(name = "pml")]
#[command(
    author,
    version,
    about = "Lightweight issue lifecycle tracker (JSONL-backed)",
    long_about = None,
    after_help = "Non-invasive: no git hooks, no daemons, no external integrations."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Project scope override (skips working-directory resolution)
    #[arg(long, global = true, env = "PM_PROJECT_ID")]
    pub project: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register the current directory as a project
    Init(InitArgs),

    /// List registered projects
    Projects,

    /// Create a new issue
    Create(CreateArgs),

    /// Show issue details
    Show(ShowArgs),

    /// List issues in the scoped project
    List(ListArgs),

    /// Transition an issue to a new status
    Status(StatusArgs),

    /// Show dependency analysis for an issue
    Deps(DepsArgs),

    /// Show the prioritized work queue
    Queue(QueueArgs),

    /// List issues ready to pick up
    Ready,

    /// List blocked issues (unblockable first)
    Blocked,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name (defaults to the directory name)
    pub name: Option<String>,

    /// Slug seeding the issue-key prefix (defaults to the name)
    #[arg(long)]
    pub slug: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Issue title
    pub title: String,

    /// Detailed description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Issue type: feature, bug, refactor, chore, spike
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub issue_type: Option<String>,

    /// Priority: P1 (urgent) .. P5 (backlog)
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Owner (defaults to PM_OWNER when set)
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Module or component
    #[arg(short, long)]
    pub module: Option<String>,

    /// Dependency key (repeatable)
    #[arg(long = "dep", value_name = "KEY")]
    pub dependencies: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Issue key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(short, long)]
    pub status: Option<String>,

    /// Filter by type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub issue_type: Option<String>,

    /// Filter by owner
    #[arg(short, long)]
    pub owner: Option<String>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Issue key
    pub key: String,

    /// Target status
    pub status: String,

    /// Blocker reason (required when blocking)
    #[arg(short, long)]
    pub reason: Option<String>,
}

#[derive(Args, Debug)]
pub struct DepsArgs {
    /// Issue key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct QueueArgs {
    /// Sort: urgency (default), priority, dependency, age
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Maximum entries
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Restrict to this owner
    #[arg(short, long)]
    pub owner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_create() {
        let cli = Cli::try_parse_from([
            "pml", "create", "Fix login", "-t", "bug", "-p", "P1", "--dep", "X-202501-001",
        ])
        .unwrap();
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.title, "Fix login");
                assert_eq!(args.issue_type.as_deref(), Some("bug"));
                assert_eq!(args.priority.as_deref(), Some("P1"));
                assert_eq!(args.dependencies, vec!["X-202501-001".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_global_project_flag() {
        let cli = Cli::try_parse_from(["pml", "--project", "p1", "ready"]).unwrap();
        assert_eq!(cli.project.as_deref(), Some("p1"));
        assert!(matches!(cli.command, Commands::Ready));
    }

    #[test]
    fn test_cli_status_with_reason() {
        let cli = Cli::try_parse_from([
            "pml",
            "status",
            "MYCO-202503-001",
            "blocked",
            "--reason",
            "waiting on infra",
        ])
        .unwrap();
        match cli.command {
            Commands::Status(args) => {
                assert_eq!(args.status, "blocked");
                assert_eq!(args.reason.as_deref(), Some("waiting on infra"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
