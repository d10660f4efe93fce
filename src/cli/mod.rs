//! Command-line interface for `rt`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rtckt_lib::project;

use crate::config::{CliOverrides, Config};
use crate::logging::{self, LogFormat};
use crate::output::OutputContext;
use crate::session::Session;

/// `rt` - personal ticket tracker.
#[derive(Parser, Debug)]
#[command(name = "rt")]
#[command(
    author,
    version,
    about = "Personal ticket tracker with nested projects and blocking dependencies",
    long_about = None,
    after_help = "Tickets are JSON files under the root directory (default ~/rtckt)."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Root project directory
    #[arg(long, global = true, env = "RTCKT_ROOT")]
    pub root: Option<PathBuf>,

    /// Project to operate on, relative to the root (e.g. work/backend)
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// Config file to read instead of ~/.config/rtckt/config.yaml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the root project directory
    Init,

    /// Create a new ticket
    New(NewArgs),

    /// Show ticket details
    Show(TicketArg),

    /// List tickets in the project and its sub-projects
    #[command(alias = "ls")]
    List(ListArgs),

    /// Close a ticket and unblock tickets waiting on it
    Close(TicketArg),

    /// Delete a ticket
    #[command(alias = "rm")]
    Delete(TicketArg),

    /// Status counts for the project
    #[command(alias = "status")]
    Summary,

    /// Show the project tree
    Tree,

    /// Manage projects
    Project(ProjectCommand),

    /// Show version information
    Version,
}

#[derive(Args, Debug, Default)]
pub struct NewArgs {
    /// Ticket name (also its filename)
    pub name: String,

    /// Free-form detail text
    #[arg(short, long, default_value = "")]
    pub detail: String,

    /// Sibling ticket this one waits on (repeatable)
    #[arg(long = "dep", value_name = "NAME")]
    pub dependencies: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct TicketArg {
    /// Ticket name
    pub name: String,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only tickets directly in the project, not in sub-projects
    #[arg(long)]
    pub direct: bool,

    /// Filter by status (open, blocked, closed); repeatable
    #[arg(short, long)]
    pub status: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ProjectCommand {
    /// Project subcommand
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// Create a project (parents included)
    New(ProjectPathArg),

    /// Delete a project with all its tickets and sub-projects
    Delete(ProjectDeleteArgs),
}

#[derive(Args, Debug)]
pub struct ProjectPathArg {
    /// Project path relative to the root
    pub path: String,
}

#[derive(Args, Debug)]
pub struct ProjectDeleteArgs {
    /// Project path relative to the root
    pub path: String,

    /// Confirm the irreversible delete
    #[arg(long)]
    pub force: bool,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let log_format = cli.log_json.then_some(LogFormat::Json);
    logging::init_logging(cli.verbose, cli.quiet, log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let ctx = OutputContext::from_flags(cli.json, cli.quiet);
    let Some(command) = cli.command else {
        println!("rt - personal ticket tracker. Use --help for usage.");
        return Ok(());
    };

    let overrides = CliOverrides {
        root: cli.root,
        project: cli.project,
        config_path: cli.config,
    };
    let config = Config::load(&overrides)?;
    let mut session = Session::new(&config)?;
    if !matches!(command, Commands::Version) {
        project::setup(session.root())?;
    }
    tracing::debug!(command = command.name(), root = %session.root().display(), "Dispatching");

    match command {
        Commands::Init => commands::init::execute(&mut session, &ctx)?,
        Commands::New(args) => commands::create::execute(&args, &session, &ctx)?,
        Commands::Show(args) => commands::show::execute(&args, &session, &ctx)?,
        Commands::List(args) => commands::list::execute(&args, &session, &ctx)?,
        Commands::Close(args) => commands::close::execute(&args, &session, &ctx)?,
        Commands::Delete(args) => commands::delete::execute(&args, &session, &ctx)?,
        Commands::Summary => commands::summary::execute(&session, &ctx)?,
        Commands::Tree => commands::tree::execute(&session, &ctx)?,
        Commands::Project(project) => commands::project::execute(&project, &session, &ctx)?,
        Commands::Version => commands::version::execute(&ctx)?,
    }

    Ok(())
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::New(_) => "new",
            Self::Show(_) => "show",
            Self::List(_) => "list",
            Self::Close(_) => "close",
            Self::Delete(_) => "delete",
            Self::Summary => "summary",
            Self::Tree => "tree",
            Self::Project(project) => match project.command {
                ProjectSubcommand::New(_) => "project new",
                ProjectSubcommand::Delete(_) => "project delete",
            },
            Self::Version => "version",
        }
    }
}
