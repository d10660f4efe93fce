//! Project subcommands.

use crate::cli::{ProjectCommand, ProjectDeleteArgs, ProjectPathArg, ProjectSubcommand};
use crate::error::{RtError, Result};
use crate::output::OutputContext;
use crate::session::Session;
use rtckt_lib::project;
use serde::Serialize;

#[derive(Serialize)]
struct ProjectOutput {
    project: String,
    path: String,
    changed: bool,
}

/// Execute a project subcommand.
///
/// # Errors
///
/// Returns an error if the path escapes the root or the filesystem
/// operation fails.
pub fn execute(cmd: &ProjectCommand, session: &Session, ctx: &OutputContext) -> Result<()> {
    match &cmd.command {
        ProjectSubcommand::New(args) => new_project(args, session, ctx),
        ProjectSubcommand::Delete(args) => delete_project(args, session, ctx),
    }
}

fn new_project(args: &ProjectPathArg, session: &Session, ctx: &OutputContext) -> Result<()> {
    let path = session.resolve_project(&args.path)?;
    let existed = path.is_dir();
    project::new_project(&path)?;

    if ctx.is_json() {
        return ctx.json(&ProjectOutput {
            project: args.path.clone(),
            path: path.display().to_string(),
            changed: !existed,
        });
    }
    if existed {
        ctx.line(format!("Project {} already exists", args.path));
    } else {
        ctx.line(format!("Created project {}", args.path));
    }
    Ok(())
}

fn delete_project(args: &ProjectDeleteArgs, session: &Session, ctx: &OutputContext) -> Result<()> {
    let path = session.resolve_project(&args.path)?;
    if path == session.root() {
        return Err(RtError::validation(
            "path",
            "refusing to delete the root directory",
        ));
    }
    if !args.force {
        return Err(RtError::NeedsForce {
            action: format!("delete project {} and everything in it", args.path),
        });
    }

    let deleted = project::delete_project(&path)?;

    if ctx.is_json() {
        return ctx.json(&ProjectOutput {
            project: args.path.clone(),
            path: path.display().to_string(),
            changed: deleted,
        });
    }
    if deleted {
        ctx.line(format!("Deleted project {}", args.path));
    } else {
        ctx.line(format!("No project named {}", args.path));
    }
    Ok(())
}
