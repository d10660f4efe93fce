//! Show command implementation.

use crate::cli::TicketArg;
use crate::error::Result;
use crate::format::{TicketDetails, format_fields, format_status_icon};
use crate::output::OutputContext;
use crate::session::Session;
use rtckt_lib::store;

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the name is invalid or the ticket is missing or
/// malformed.
pub fn execute(args: &TicketArg, session: &Session, ctx: &OutputContext) -> Result<()> {
    let dir = session.project_dir();
    let path = session.ticket_path(&args.name)?;
    let ticket = store::get(&path)?;

    if ctx.is_json() {
        let details = TicketDetails::new(
            ticket,
            session.display_path(&dir),
            path.display().to_string(),
        );
        return ctx.json(&details);
    }

    let dependencies = if ticket.dependencies.is_empty() {
        "(none)".to_string()
    } else {
        ticket.dependencies.join(", ")
    };
    let rows = [
        ("Ticket", ticket.name.clone()),
        ("Project", session.display_path(&dir)),
        (
            "Status",
            format!("{} {}", format_status_icon(ticket.status), ticket.status),
        ),
        ("Dependencies", dependencies),
    ];
    for line in format_fields(&rows) {
        ctx.line(line);
    }
    if !ticket.detail.is_empty() {
        ctx.line("");
        ctx.line(&ticket.detail);
    }
    Ok(())
}
