//! Close command implementation.

use crate::cli::TicketArg;
use crate::error::Result;
use crate::format::CloseReport;
use crate::output::OutputContext;
use crate::session::Session;
use rtckt_lib::{CloseOutcome, resolver};

/// Execute the close command.
///
/// A blocked ticket is not an error: the refusal is reported and nothing
/// is written.
///
/// # Errors
///
/// Returns an error if the ticket cannot be loaded or saved.
pub fn execute(args: &TicketArg, session: &Session, ctx: &OutputContext) -> Result<()> {
    let path = session.ticket_path(&args.name)?;
    let report = match resolver::close(&path)? {
        CloseOutcome::Refused { name, pending } => CloseReport::refused(name, pending),
        CloseOutcome::Closed(cascade) => CloseReport::from_cascade(cascade),
    };

    if ctx.is_json() {
        return ctx.json(&report);
    }

    if !report.closed {
        let mut pending = report.pending.clone();
        pending.sort();
        ctx.line(format!(
            "Cannot close {}: still blocked by {}",
            report.name,
            pending.join(", ")
        ));
        return Ok(());
    }

    if report.already_closed {
        ctx.line(format!("{} was already closed", report.name));
    } else {
        ctx.line(format!("Closed {}", report.name));
    }
    let mut reopened = report.reopened.clone();
    reopened.sort();
    for name in &reopened {
        ctx.line(format!("  Unblocked {name}"));
    }
    for failure in &report.failures {
        ctx.line(format!("  ! Skipped {}: {}", failure.path, failure.error));
    }
    Ok(())
}
