//! New-ticket command.

use crate::cli::NewArgs;
use crate::error::Result;
use crate::format::{TicketDetails, format_ticket_line};
use crate::output::OutputContext;
use crate::session::Session;
use rtckt_lib::store;

/// Execute the new command.
///
/// Dependencies on sibling tickets that are already closed are dropped;
/// the ticket starts `blocked` only if any remain.
///
/// # Errors
///
/// Returns an error if the project does not exist, the name is invalid, or
/// the ticket cannot be written.
pub fn execute(args: &NewArgs, session: &Session, ctx: &OutputContext) -> Result<()> {
    let dir = session.require_project()?;

    let path = session.ticket_path(&args.name)?;
    if path.exists() {
        tracing::info!(path = %path.display(), "Overwriting existing ticket");
    }

    let ticket = store::create(&dir, &args.name, &args.detail, &args.dependencies)?;

    let dropped: Vec<&String> = args
        .dependencies
        .iter()
        .filter(|dep| !ticket.depends_on(dep))
        .collect();
    for dep in &dropped {
        tracing::debug!(dependency = %dep, "Dropped dependency on closed ticket");
    }

    if ctx.is_json() {
        let details = TicketDetails::new(
            ticket,
            session.display_path(&dir),
            path.display().to_string(),
        );
        return ctx.json(&details);
    }

    ctx.line(format!("Created {}", format_ticket_line(&ticket)));
    if !dropped.is_empty() {
        let names: Vec<&str> = dropped.iter().map(|d| d.as_str()).collect();
        ctx.line(format!("Ignored closed dependencies: {}", names.join(", ")));
    }
    Ok(())
}
