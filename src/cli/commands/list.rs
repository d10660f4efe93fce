//! List command implementation.
//!
//! Lists every ticket under the selected project, or only its direct
//! tickets with `--direct`.

use crate::cli::ListArgs;
use crate::error::{RtError, Result};
use crate::format::{TicketEntry, Unreadable, format_ticket_line};
use crate::output::OutputContext;
use crate::session::Session;
use rtckt_lib::{Status, Ticket, store};
use serde::Serialize;

#[derive(Serialize)]
struct ListOutput {
    tickets: Vec<TicketEntry>,
    unreadable: Vec<Unreadable>,
}

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if a status filter is invalid or the project cannot
/// be listed.
pub fn execute(args: &ListArgs, session: &Session, ctx: &OutputContext) -> Result<()> {
    let statuses = parse_statuses(&args.status)?;
    let dir = session.require_project()?;

    let paths = if args.direct {
        store::list_siblings(&dir)?
    } else {
        store::list(&dir)?
    };

    let mut tickets: Vec<(String, Ticket)> = Vec::new();
    let mut unreadable = Vec::new();
    for path in paths {
        match store::get(&path) {
            Ok(ticket) => {
                if statuses.is_empty() || statuses.contains(&ticket.status) {
                    let project = path
                        .parent()
                        .map_or_else(String::new, |p| session.display_path(p));
                    tickets.push((project, ticket));
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable ticket");
                unreadable.push(Unreadable {
                    path: session.display_path(&path),
                    error: e.to_string(),
                });
            }
        }
    }
    tickets.sort_by(|(pa, a), (pb, b)| pa.cmp(pb).then_with(|| a.name.cmp(&b.name)));

    if ctx.is_json() {
        let output = ListOutput {
            tickets: tickets
                .into_iter()
                .map(|(project, ticket)| TicketEntry {
                    status_name: ticket.status.as_str(),
                    status: ticket.status,
                    name: ticket.name,
                    dependencies: ticket.dependencies,
                    project,
                })
                .collect(),
            unreadable,
        };
        return ctx.json(&output);
    }

    if tickets.is_empty() {
        ctx.line("No tickets found.");
    }
    let mut current: Option<&str> = None;
    for (project, ticket) in &tickets {
        if current != Some(project.as_str()) {
            ctx.line(format!("{project}/"));
            current = Some(project.as_str());
        }
        ctx.line(format!("  {}", format_ticket_line(ticket)));
    }
    for bad in &unreadable {
        ctx.line(format!("! {} ({})", bad.path, bad.error));
    }
    if !tickets.is_empty() {
        ctx.line(format!("\n{} ticket(s)", tickets.len()));
    }
    Ok(())
}

fn parse_statuses(raw: &[String]) -> Result<Vec<Status>> {
    raw.iter()
        .map(|s| s.parse::<Status>().map_err(|e| RtError::validation("status", e)))
        .collect()
}
