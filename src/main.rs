//! `pm_lite` (pml) - Lightweight issue lifecycle tracker
//!
//! JSONL-backed issue tracking with a strict status state machine,
//! dependency analysis, and project-scoped commands. Non-invasive
//! design: no daemons, no git hooks, no background processes.

use clap::Parser;

use pm_lite::cli::{Cli, Commands, commands};
use pm_lite::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("Failed to initialize logging: {e}");
        // Continue without logging rather than refusing to run
    }

    let json = cli.json;
    let project = cli.project.clone();

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(&args, json),
        Commands::Projects => commands::projects::execute(json),
        Commands::Create(args) => commands::create::execute(args, project.as_deref(), json),
        Commands::Show(args) => commands::show::execute(&args, project.as_deref(), json),
        Commands::List(args) => commands::list::execute(&args, project.as_deref(), json),
        Commands::Status(args) => commands::status::execute(&args, project.as_deref(), json),
        Commands::Deps(args) => commands::deps::execute(&args, project.as_deref(), json),
        Commands::Queue(args) => commands::queue::execute(&args, project.as_deref(), json),
        Commands::Ready => commands::ready::execute(project.as_deref(), json),
        Commands::Blocked => commands::blocked::execute(project.as_deref(), json),
    };

    if let Err(e) = result {
        commands::handle_error(&e, json);
    }
}
