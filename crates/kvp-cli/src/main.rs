mod cmd;
mod output;
mod workspace;

use clap::{Parser, Subcommand};
use cmd::{
    phase::{ActSubcommand, CheckSubcommand, PlanSubcommand},
    project::ProjectSubcommand,
    task::TaskSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kvp",
    about = "PDCA continuous-improvement tracker — manage projects, tasks, and metrics",
    version,
    propagate_version = true
)]
struct Cli {
    /// Working document (default: auto-detect kvp.json upward from cwd)
    #[arg(long, global = true, env = "KVP_FILE")]
    file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty working document
    Init,

    /// Manage projects
    Project {
        #[command(subcommand)]
        subcommand: ProjectSubcommand,
    },

    /// Show or set the session role (display gating only)
    Role { role: Option<String> },

    /// Edit or show the Plan phase of the active project
    Plan {
        #[command(subcommand)]
        subcommand: PlanSubcommand,
    },

    /// Manage implementation steps of the active project
    Task {
        #[command(subcommand)]
        subcommand: TaskSubcommand,
    },

    /// Edit or show the Check phase of the active project
    Check {
        #[command(subcommand)]
        subcommand: CheckSubcommand,
    },

    /// Edit or show the Act phase of the active project
    Act {
        #[command(subcommand)]
        subcommand: ActSubcommand,
    },

    /// Show progress, task counts, and improvement for the active project
    Dashboard,

    /// Write the active project to a snapshot file
    Export { path: Option<PathBuf> },

    /// Add a project from a snapshot file
    Import { path: PathBuf },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let file = workspace::resolve_store_file(cli.file.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&file),
        Commands::Project { subcommand } => cmd::project::run(&file, subcommand, cli.json),
        Commands::Role { role } => cmd::role::run(&file, role.as_deref(), cli.json),
        Commands::Plan { subcommand } => cmd::phase::run_plan(&file, subcommand, cli.json),
        Commands::Task { subcommand } => cmd::task::run(&file, subcommand, cli.json),
        Commands::Check { subcommand } => cmd::phase::run_check(&file, subcommand, cli.json),
        Commands::Act { subcommand } => cmd::phase::run_act(&file, subcommand, cli.json),
        Commands::Dashboard => cmd::dashboard::run(&file, cli.json),
        Commands::Export { path } => cmd::export::export(&file, path.as_deref(), cli.json),
        Commands::Import { path } => cmd::export::import(&file, &path, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
