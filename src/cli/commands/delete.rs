use crate::cli::TicketArg;
use crate::error::Result;
use crate::output::OutputContext;
use crate::session::Session;
use rtckt_lib::store;
use serde::Serialize;

#[derive(Serialize)]
struct DeleteOutput<'a> {
    name: &'a str,
    deleted: bool,
}

/// Execute the delete command.
///
/// Deleting a ticket that does not exist succeeds and reports
/// `deleted: false`. Siblings that still list the ticket as a dependency
/// are left as they are.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn execute(args: &TicketArg, session: &Session, ctx: &OutputContext) -> Result<()> {
    let deleted = store::delete(session.ticket_path(&args.name)?)?;

    if ctx.is_json() {
        return ctx.json(&DeleteOutput {
            name: &args.name,
            deleted,
        });
    }
    if deleted {
        ctx.line(format!("Deleted {}", args.name));
    } else {
        ctx.line(format!("No ticket named {}", args.name));
    }
    Ok(())
}
